//! Contains a player's mixed strategy and the regret update that moves it
//!
//! A round for one player has two halves. `evaluate` only reads: it measures how much every
//! pure strategy would have gained over the current mixed strategy against a frozen profile.
//! `apply` then records the round and shifts probability mass toward the strategies with regret.
use crate::constants::{
    round_to, MIN_STRATEGIES, RANDOM_WEIGHT_MAX, ROUND_DECIMALS, SIMPLEX_TOLERANCE,
};
use crate::payoff::PayoffTable;
use crate::snapshot::ProfileSnapshot;
use crate::strategy_space::StrategySpace;
use ndarray::prelude::*;
use rand::Rng;
use std::result::Result;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlayerError {
    #[error("{0} cannot be the number of strategies per player")]
    InvalidStrategyCount(usize),
    #[error("player with {expected} pure strategies initialized to {found} probabilities")]
    StrategyDimensionMismatch { expected: usize, found: usize },
    #[error("{0:?} is not a point on the probability simplex")]
    NotOnSimplex(Vec<f64>),
    #[error("player has no mixed strategy yet")]
    Uninitialized,
}

/// Where a player is in its lifecycle
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PlayerPhase {
    /// no mixed strategy assigned
    Uninitialized,
    /// mixed strategy assigned, no round played
    Ready,
    /// at least one round played
    Iterating,
}

/// A mixed strategy together with the regret measured at it
#[derive(Debug, Clone, PartialEq)]
pub struct Iterate {
    pub mixed_strategy: Array1<f64>,
    pub regret: Array1<f64>,
}

impl Iterate {
    pub fn regret_sum(&self) -> f64 {
        self.regret.sum()
    }
}

/// Result of measuring one player against a frozen profile
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// expected payoff of playing each pure strategy for sure
    pub vertex_payoffs: Array1<f64>,
    /// expected payoff of the current mixed strategy
    pub payoff: f64,
    /// non-negative gain of each pure strategy over `payoff`
    pub regret: Array1<f64>,
}

impl Evaluation {
    pub fn regret_sum(&self) -> f64 {
        self.regret.sum()
    }
}

/// Moves `strategy` by `learning_rate * regret` and rescales it back onto the simplex
///
/// `regret` must be non-negative and `strategy` a simplex point, so the sum being divided by is at
/// least 1.
pub fn simplex_update(
    strategy: &Array1<f64>,
    regret: &Array1<f64>,
    learning_rate: f64,
) -> Array1<f64> {
    let mut updated = strategy + &(regret * learning_rate);
    let sum = updated.sum();
    updated /= sum;
    updated
}

/// Draws a random simplex point with `n` coordinates
///
/// Integer weights from [1, 100) are normalized and rounded to 4 decimals,
/// the rounding residual goes into the largest coordinate.
/// When the residual would push that coordinate below zero the unrounded point is kept.
pub fn random_simplex_point<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Array1<f64> {
    let weights: Vec<f64> = (0..n)
        .map(|_| {
            let weight: u32 = rng.gen_range(1, RANDOM_WEIGHT_MAX);
            f64::from(weight)
        })
        .collect();
    let total: f64 = weights.iter().sum();
    let exact = Array1::from(weights) / total;
    let mut point = exact.mapv(|p| round_to(p, ROUND_DECIMALS));
    let residual = 1.0 - point.sum();
    let largest = point
        .iter()
        .enumerate()
        .fold(0, |best, (i, &p)| if p > point[best] { i } else { best });
    point[largest] += residual;
    if point.iter().all(|&p| p >= 0.0) {
        point
    } else {
        exact
    }
}

/// Checks that `strategy` is a probability distribution
fn check_simplex(strategy: &[f64]) -> Result<(), PlayerError> {
    let valid = strategy.iter().all(|&p| p.is_finite() && p >= 0.0)
        && (strategy.iter().sum::<f64>() - 1.0).abs() <= SIMPLEX_TOLERANCE;
    if valid {
        Ok(())
    } else {
        Err(PlayerError::NotOnSimplex(strategy.to_vec()))
    }
}

/// Represents one player of a normal-form game
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// number of pure strategies
    strategy_count: usize,
    /// probability of each pure strategy
    mixed_strategy: Option<Array1<f64>>,
    /// regret of the most recent round
    regret: Option<Array1<f64>>,
    /// one entry per round played since the last initialization
    history: Vec<Iterate>,
}

impl PlayerState {
    /// Creates a player with `strategy_count` pure strategies
    ///
    /// # Examples
    ///
    /// ```
    /// use nash_solver::player::PlayerState;
    /// assert!(PlayerState::new(3).is_ok());
    /// assert!(PlayerState::new(1).is_err());
    /// ```
    pub fn new(strategy_count: usize) -> Result<Self, PlayerError> {
        if strategy_count < MIN_STRATEGIES {
            return Err(PlayerError::InvalidStrategyCount(strategy_count));
        }
        Ok(PlayerState {
            strategy_count,
            mixed_strategy: None,
            regret: None,
            history: Vec::new(),
        })
    }
    pub const fn strategy_count(&self) -> usize {
        self.strategy_count
    }
    pub fn mixed_strategy(&self) -> Option<&Array1<f64>> {
        self.mixed_strategy.as_ref()
    }
    pub fn regret(&self) -> Option<&Array1<f64>> {
        self.regret.as_ref()
    }
    /// sum of the latest regret vector, 0 before the first round
    pub fn regret_sum(&self) -> f64 {
        self.regret.as_ref().map_or(0.0, |r| r.sum())
    }
    pub fn history(&self) -> &[Iterate] {
        &self.history
    }
    pub fn phase(&self) -> PlayerPhase {
        match (&self.mixed_strategy, &self.regret) {
            (None, _) => PlayerPhase::Uninitialized,
            (Some(_), None) => PlayerPhase::Ready,
            (Some(_), Some(_)) => PlayerPhase::Iterating,
        }
    }
    /// Sets a custom starting mixed strategy and clears the previous regret and history
    pub fn init_mixed_strategy(&mut self, strategy: Vec<f64>) -> Result<(), PlayerError> {
        if strategy.len() != self.strategy_count {
            return Err(PlayerError::StrategyDimensionMismatch {
                expected: self.strategy_count,
                found: strategy.len(),
            });
        }
        check_simplex(&strategy)?;
        self.reset(Array1::from(strategy));
        Ok(())
    }
    /// Sets a random starting mixed strategy and clears the previous regret and history
    pub fn randomize_mixed_strategy<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let strategy = random_simplex_point(self.strategy_count, rng);
        self.reset(strategy);
    }
    fn reset(&mut self, strategy: Array1<f64>) {
        self.mixed_strategy = Some(strategy);
        self.regret = None;
        self.history.clear();
    }
    /// Measures the regret of every pure strategy against a frozen profile
    ///
    /// The player's own strategy is read from the snapshot too, so evaluating every player
    /// before applying any update keeps the moves simultaneous.
    ///
    /// # Arguments
    ///
    /// * `index` - this player's position in the game
    /// * `snapshot` - strategies of all players at the start of the round
    /// * `space` - the joint outcome space
    /// * `payoffs` - this player's payoff table
    pub fn evaluate(
        &self,
        index: usize,
        snapshot: &ProfileSnapshot,
        space: &StrategySpace,
        payoffs: &PayoffTable,
    ) -> Evaluation {
        let vertex_payoffs = snapshot.vertex_payoffs(index, space, payoffs);
        debug_assert_eq!(vertex_payoffs.len(), self.strategy_count);
        let payoff = snapshot.strategy(index).dot(&vertex_payoffs);
        let regret = vertex_payoffs.mapv(|v| (v - payoff).max(0.0));
        Evaluation {
            vertex_payoffs,
            payoff,
            regret,
        }
    }
    /// Records the round and moves the mixed strategy along its regret
    ///
    /// A zero regret vector leaves the mixed strategy untouched.
    pub fn apply(&mut self, evaluation: Evaluation, learning_rate: f64) -> Result<(), PlayerError> {
        let current = self
            .mixed_strategy
            .take()
            .ok_or(PlayerError::Uninitialized)?;
        let next = if evaluation.regret_sum() > 0.0 {
            simplex_update(&current, &evaluation.regret, learning_rate)
        } else {
            current.clone()
        };
        self.history.push(Iterate {
            mixed_strategy: current,
            regret: evaluation.regret.clone(),
        });
        self.regret = Some(evaluation.regret);
        self.mixed_strategy = Some(next);
        Ok(())
    }
    /// Evaluates against `snapshot` and applies the update, returning this round's regret sum
    pub fn run_one_iteration(
        &mut self,
        index: usize,
        snapshot: &ProfileSnapshot,
        space: &StrategySpace,
        payoffs: &PayoffTable,
        learning_rate: f64,
    ) -> Result<f64, PlayerError> {
        let evaluation = self.evaluate(index, snapshot, space, payoffs);
        let regret_sum = evaluation.regret_sum();
        self.apply(evaluation, learning_rate)?;
        Ok(regret_sum)
    }
}
