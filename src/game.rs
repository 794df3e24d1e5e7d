//! The equilibrium engine
//!
//! A `Game` owns its players, the joint strategy space and one payoff table per player.
//! Running it repeats simultaneous regret updates and keeps the round with the lowest
//! aggregate regret as its Nash equilibrium approximation.
use crate::constants::{
    DEFAULT_ITERATIONS, DEFAULT_LEARNING_RATE, RANDOM_PAYOFF_HIGH, RANDOM_PAYOFF_LOW,
};
use crate::equilibrium::{Equilibrium, PlayerEquilibrium};
use crate::payoff::PayoffTable;
use crate::player::{Evaluation, PlayerError, PlayerState};
use crate::snapshot::{ProfileSnapshot, SnapshotError};
use crate::strategy_space::{StrategySpace, StrategySpaceError};
use crate::trajectory::Trajectory;
use rand::Rng;
use std::result::Result;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("cannot add players after the strategy space is fixed")]
    SpaceAlreadyBuilt,
    #[error("player {0} does not exist")]
    UnknownPlayer(usize),
    #[error("{players} players given {given} initial strategies")]
    InitialStrategiesMismatch { players: usize, given: usize },
    #[error("no payoffs assigned, the strategy space is not built")]
    PayoffsNotAssigned,
    #[error("iterations must be greater than zero")]
    InvalidIterations,
    #[error("learning rate must be positive and finite, got {0}")]
    InvalidLearningRate(f64),
    #[error("stop patience must be at least one round")]
    InvalidPatience,
    #[error("a regret worker thread panicked")]
    WorkerPanicked,
    #[error("player {player}: {source}")]
    Player {
        player: usize,
        #[source]
        source: PlayerError,
    },
    #[error(transparent)]
    Space(#[from] StrategySpaceError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Stop a run early once aggregate regret stays below `threshold`
/// for `patience` consecutive rounds
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StopCriterion {
    pub threshold: f64,
    pub patience: usize,
}

/// options for running the regret dynamic
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// maximum number of rounds
    pub iterations: usize,
    /// step size of the simplex update
    pub learning_rate: f64,
    /// evaluate every player on its own thread
    pub parallel: bool,
    /// optional early stop, checked between rounds
    pub stop: Option<StopCriterion>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            iterations: DEFAULT_ITERATIONS,
            learning_rate: DEFAULT_LEARNING_RATE,
            parallel: false,
            stop: None,
        }
    }
}

/// A finite N-player normal-form game
#[derive(Debug, Clone, Default)]
pub struct Game {
    players: Vec<PlayerState>,
    /// built on the first payoff assignment, fixes the set of players
    space: Option<StrategySpace>,
    /// one table per player once the space is built
    payoffs: Vec<PayoffTable>,
}

impl Game {
    pub fn new() -> Self {
        Game::default()
    }
    /// Adds a player with `strategy_count` pure strategies and returns its index
    pub fn join(&mut self, strategy_count: usize) -> Result<usize, GameError> {
        if self.space.is_some() {
            return Err(GameError::SpaceAlreadyBuilt);
        }
        let index = self.players.len();
        let player = PlayerState::new(strategy_count)
            .map_err(|source| GameError::Player {
                player: index,
                source,
            })?;
        self.players.push(player);
        Ok(index)
    }
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }
    pub fn player(&self, index: usize) -> Option<&PlayerState> {
        self.players.get(index)
    }
    pub fn space(&self) -> Option<&StrategySpace> {
        self.space.as_ref()
    }
    pub fn payoff_table(&self, player: usize) -> Option<&PayoffTable> {
        self.payoffs.get(player)
    }
    /// Builds the joint strategy space from the current players
    ///
    /// Only the first call builds; afterwards the space is fixed and no player may join.
    /// Every player gets a zero-filled payoff table.
    pub fn build_space(&mut self) -> Result<&StrategySpace, GameError> {
        let space = match self.space.take() {
            Some(space) => space,
            None => {
                let counts: Vec<usize> =
                    self.players.iter().map(|p| p.strategy_count()).collect();
                let space = StrategySpace::build(&counts)?;
                self.payoffs = vec![PayoffTable::zeros(space.len()); self.players.len()];
                space
            }
        };
        Ok(self.space.get_or_insert(space))
    }
    fn check_player(&self, player: usize) -> Result<(), GameError> {
        if player < self.players.len() {
            Ok(())
        } else {
            Err(GameError::UnknownPlayer(player))
        }
    }
    /// Sets `player`'s payoff for the joint outcome `combination`
    ///
    /// # Arguments
    ///
    /// * `player` - 0-based player index
    /// * `combination` - 0-based pure strategy index of every player
    /// * `value` - payoff
    pub fn assign_payoff(
        &mut self,
        player: usize,
        combination: &[usize],
        value: f64,
    ) -> Result<(), GameError> {
        self.check_player(player)?;
        let index = self.build_space()?.index_of(combination)?;
        self.payoffs[player].assign(index, value);
        Ok(())
    }
    /// Sets `player`'s payoff for the joint outcome named by a label of 1-based strategy numbers
    ///
    /// # Examples
    ///
    /// ```
    /// use nash_solver::game::Game;
    /// let mut game = Game::new();
    /// game.join(2).unwrap();
    /// game.join(2).unwrap();
    /// // first player plays its second strategy, second player its first
    /// game.assign_payoff_label(0, "21", -1.0).unwrap();
    /// assert_eq!(game.payoff_table(0).unwrap().get(2), -1.0);
    /// ```
    pub fn assign_payoff_label(
        &mut self,
        player: usize,
        label: &str,
        value: f64,
    ) -> Result<(), GameError> {
        self.check_player(player)?;
        let index = self.build_space()?.index_of_label(label)?;
        self.payoffs[player].assign(index, value);
        Ok(())
    }
    /// Replaces every payoff table with independent integer payoffs from [-1000, 1000)
    pub fn assign_random_payoffs<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        let size = self.build_space()?.len();
        for table in self.payoffs.iter_mut() {
            *table = PayoffTable::random(size, RANDOM_PAYOFF_LOW, RANDOM_PAYOFF_HIGH, rng);
        }
        info!("payoff functions were randomized");
        Ok(())
    }
    /// Gives every player a random starting mixed strategy
    pub fn initialize_strategies<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for player in self.players.iter_mut() {
            player.randomize_mixed_strategy(rng);
        }
        info!("initial strategies were randomized");
    }
    /// Gives every player a custom starting mixed strategy
    ///
    /// Nothing changes unless every vector is valid for its player.
    pub fn initialize_strategies_with(
        &mut self,
        strategies: Vec<Vec<f64>>,
    ) -> Result<(), GameError> {
        if strategies.len() != self.players.len() {
            return Err(GameError::InitialStrategiesMismatch {
                players: self.players.len(),
                given: strategies.len(),
            });
        }
        let mut players = self.players.clone();
        for (i, (player, strategy)) in players.iter_mut().zip(strategies).enumerate() {
            player
                .init_mixed_strategy(strategy)
                .map_err(|source| GameError::Player { player: i, source })?;
        }
        self.players = players;
        info!("initial strategies were customized");
        Ok(())
    }
    /// Evaluates every player against the same snapshot, one after another
    fn evaluate_sequential(
        &self,
        space: &StrategySpace,
        snapshot: &ProfileSnapshot,
    ) -> Vec<Evaluation> {
        self.players
            .iter()
            .zip(&self.payoffs)
            .enumerate()
            .map(|(i, (player, payoffs))| player.evaluate(i, snapshot, space, payoffs))
            .collect()
    }
    /// Evaluates every player against the same snapshot on scoped worker threads
    fn evaluate_parallel(
        &self,
        space: &StrategySpace,
        snapshot: &ProfileSnapshot,
    ) -> Result<Vec<Evaluation>, GameError> {
        let players = &self.players;
        let payoffs = &self.payoffs;
        let joined = crossbeam::scope(|scope| {
            let handles: Vec<_> = players
                .iter()
                .zip(payoffs)
                .enumerate()
                .map(|(i, (player, table))| {
                    scope.spawn(move |_| player.evaluate(i, snapshot, space, table))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        })
        .map_err(|_| GameError::WorkerPanicked)?;
        joined
            .into_iter()
            .map(|evaluation| evaluation.map_err(|_| GameError::WorkerPanicked))
            .collect()
    }
    /// Runs the regret dynamic and returns the round with the lowest aggregate regret
    ///
    /// Payoff tables are rescaled onto [-1000, 1000] first. In every round all players are
    /// evaluated against one snapshot of the profile before any of them updates.
    /// The best round reports each player's strategy after that round's update,
    /// together with the regret measured in that round.
    pub fn run(&mut self, options: &RunOptions) -> Result<Equilibrium, GameError> {
        if options.iterations == 0 {
            return Err(GameError::InvalidIterations);
        }
        if !(options.learning_rate.is_finite() && options.learning_rate > 0.0) {
            return Err(GameError::InvalidLearningRate(options.learning_rate));
        }
        if let Some(stop) = options.stop {
            if stop.patience == 0 {
                return Err(GameError::InvalidPatience);
            }
        }
        let space = self.space.as_ref().ok_or(GameError::PayoffsNotAssigned)?;
        // fails on the first uninitialized player before anything is touched
        ProfileSnapshot::capture(&self.players)?;

        for table in self.payoffs.iter_mut() {
            table.normalize();
        }
        info!(
            "running {} players over {} joint outcomes for {} iterations",
            self.players.len(),
            space.len(),
            options.iterations
        );
        for (i, player) in self.players.iter().enumerate() {
            if let Some(strategy) = player.mixed_strategy() {
                info!("player {} initial strategy {:?}", i + 1, strategy.to_vec());
            }
        }

        let mut best: Option<Equilibrium> = None;
        let mut below_threshold = 0usize;
        let mut iterations = 0usize;
        for t in 0..options.iterations {
            let snapshot = ProfileSnapshot::capture(&self.players)?;
            let evaluations = if options.parallel {
                self.evaluate_parallel(space, &snapshot)?
            } else {
                self.evaluate_sequential(space, &snapshot)
            };
            let aggregate: f64 = evaluations.iter().map(|e| e.regret_sum()).sum();
            let improved = best
                .as_ref()
                .map_or(true, |b| aggregate < b.aggregate_regret);
            for (i, (player, evaluation)) in self.players.iter_mut().zip(evaluations).enumerate() {
                player
                    .apply(evaluation, options.learning_rate)
                    .map_err(|source| GameError::Player { player: i, source })?;
            }
            if improved {
                debug!("round {}: new best aggregate regret {}", t, aggregate);
                best = Some(Equilibrium {
                    iterations: 0,
                    best_iteration: t,
                    aggregate_regret: aggregate,
                    players: self.current_profile()?,
                });
            }
            iterations = t + 1;

            if let Some(stop) = options.stop {
                if aggregate < stop.threshold {
                    below_threshold += 1;
                } else {
                    below_threshold = 0;
                }
                if below_threshold >= stop.patience {
                    debug!(
                        "aggregate regret below {} for {} rounds, stopping after round {}",
                        stop.threshold, below_threshold, t
                    );
                    break;
                }
            }
        }

        let mut equilibrium = best.ok_or(GameError::InvalidIterations)?;
        equilibrium.iterations = iterations;
        info!(
            "best aggregate regret {} at round {} of {}",
            equilibrium.aggregate_regret, equilibrium.best_iteration, iterations
        );
        Ok(equilibrium)
    }
    /// Every player's mixed strategy after the latest update, with the regret that drove it
    fn current_profile(&self) -> Result<Vec<PlayerEquilibrium>, GameError> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, player)| match (player.mixed_strategy(), player.regret()) {
                (Some(strategy), Some(regret)) => Ok(PlayerEquilibrium::new(strategy, regret)),
                _ => Err(GameError::Player {
                    player: i,
                    source: PlayerError::Uninitialized,
                }),
            })
            .collect()
    }
    /// Strategy paths of every player since their last initialization
    pub fn trajectory(&self) -> Trajectory {
        Trajectory::from_players(&self.players)
    }
}
