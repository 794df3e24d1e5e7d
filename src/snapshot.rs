//! Frozen strategy profiles
//!
//! Players move simultaneously: in every round each player's regret is measured against the
//! strategies all players held before anyone updated. A `ProfileSnapshot` is that frozen copy,
//! and it is the only view of the other players a regret computation gets.
use crate::payoff::PayoffTable;
use crate::player::PlayerState;
use crate::strategy_space::StrategySpace;
use ndarray::prelude::*;
use std::result::Result;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("player {0} has no mixed strategy yet")]
    Uninitialized(usize),
}

/// Copy of every player's mixed strategy at the start of a round
#[derive(Debug, Clone)]
pub struct ProfileSnapshot {
    strategies: Vec<Array1<f64>>,
}

impl ProfileSnapshot {
    /// copies the current mixed strategy of every player
    pub fn capture(players: &[PlayerState]) -> Result<Self, SnapshotError> {
        let strategies = players
            .iter()
            .enumerate()
            .map(|(i, player)| {
                player
                    .mixed_strategy()
                    .cloned()
                    .ok_or(SnapshotError::Uninitialized(i))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ProfileSnapshot { strategies })
    }
    pub fn len(&self) -> usize {
        self.strategies.len()
    }
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
    pub fn strategy(&self, player: usize) -> &Array1<f64> {
        &self.strategies[player]
    }
    pub fn strategies(&self) -> &[Array1<f64>] {
        &self.strategies
    }
    /// Expected payoff of each pure strategy of `player` when it plays that strategy for sure
    /// and every other player keeps its frozen mixed strategy
    ///
    /// Walks the joint space once: each outcome's payoff is weighted by the probability the other
    /// players reach it and credited to the pure strategy `player` uses in that outcome.
    ///
    /// # Arguments
    ///
    /// * `player` - index of the deviating player
    /// * `space` - the joint outcome space the payoff table is indexed by
    /// * `payoffs` - the deviating player's payoff table
    pub fn vertex_payoffs(
        &self,
        player: usize,
        space: &StrategySpace,
        payoffs: &PayoffTable,
    ) -> Array1<f64> {
        debug_assert_eq!(space.player_count(), self.strategies.len());
        debug_assert_eq!(space.len(), payoffs.len());
        let mut vertex = Array1::zeros(space.strategy_counts()[player]);
        for (k, combination) in space.combinations().iter().enumerate() {
            let mut prob = 1.0;
            for (i, &j) in combination.iter().enumerate() {
                if i != player {
                    prob *= self.strategies[i][j];
                }
            }
            vertex[combination[player]] += prob * payoffs.get(k);
        }
        vertex
    }
}
