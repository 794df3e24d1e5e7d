use crate::constants::{round_to, ROUND_DECIMALS};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One player's part of the best iterate found by a run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlayerEquilibrium {
    /// mixed strategy produced by the best round's update
    pub mixed_strategy: Vec<f64>,
    /// regret measured in the best round
    pub regret: Vec<f64>,
}

impl PlayerEquilibrium {
    pub fn new(mixed_strategy: &Array1<f64>, regret: &Array1<f64>) -> Self {
        PlayerEquilibrium {
            mixed_strategy: mixed_strategy.to_vec(),
            regret: regret.to_vec(),
        }
    }
    pub fn regret_sum(&self) -> f64 {
        self.regret.iter().sum()
    }
}

/// Nash equilibrium approximation: the round with the lowest aggregate regret seen in a run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Equilibrium {
    /// number of rounds the run executed
    pub iterations: usize,
    /// 0-based round the best iterate was observed in
    pub best_iteration: usize,
    /// sum of every player's regret at the best round
    pub aggregate_regret: f64,
    pub players: Vec<PlayerEquilibrium>,
}

impl Equilibrium {
    pub fn player(&self, index: usize) -> &PlayerEquilibrium {
        &self.players[index]
    }
}

fn rounded(values: &[f64]) -> Vec<f64> {
    values.iter().map(|&x| round_to(x, ROUND_DECIMALS)).collect()
}

impl fmt::Display for Equilibrium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=========== Nash Equilibrium Approximation: {} iterations ============",
            self.iterations
        )?;
        for (i, player) in self.players.iter().enumerate() {
            writeln!(
                f,
                "Player {}: Nash Eq. {:?} Deviation {:?}",
                i + 1,
                rounded(&player.mixed_strategy),
                rounded(&player.regret)
            )?;
        }
        let sums: Vec<String> = self
            .players
            .iter()
            .map(|p| round_to(p.regret_sum(), ROUND_DECIMALS).to_string())
            .collect();
        write!(
            f,
            "Deviation Sum: {} Overall: {}",
            sums.join(" "),
            round_to(self.aggregate_regret, ROUND_DECIMALS)
        )
    }
}
