//! The joint outcome space of a normal-form game
//!
//! Every joint outcome assigns one pure strategy index to every player.
//! Outcomes are stored in the order of the Cartesian product of each player's strategy range,
//! so the last player's strategy varies fastest and an outcome's position can be computed
//! directly as a mixed-radix number.
use crate::constants::{MIN_PLAYERS, MIN_STRATEGIES};
use itertools::Itertools;
use std::result::Result;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StrategySpaceError {
    #[error("{0} players, no game")]
    InsufficientPlayers(usize),
    #[error("{count} cannot be the number of strategies of player {player}")]
    InvalidStrategyCount { player: usize, count: usize },
    #[error("combination {0:?} does not match any joint outcome")]
    UnmatchedCombination(Vec<usize>),
    #[error("label \"{0}\" does not match any joint outcome")]
    UnmatchedCombinationLabel(String),
}

/// One pure strategy index per player
pub type Combination = Vec<usize>;

/// Immutable product space of all players' pure strategies
#[derive(Debug, Clone)]
pub struct StrategySpace {
    /// number of pure strategies of each player
    strategy_counts: Vec<usize>,
    /// place value of each player's digit in the mixed-radix index
    strides: Vec<usize>,
    /// every joint outcome in lexicographic order
    combinations: Vec<Combination>,
}

impl StrategySpace {
    /// Builds the Cartesian product of `range(strategy_counts[i])` over all players
    ///
    /// # Arguments
    ///
    /// * `strategy_counts` - The number of pure strategies of each player, in player order
    pub fn build(strategy_counts: &[usize]) -> Result<Self, StrategySpaceError> {
        if strategy_counts.len() < MIN_PLAYERS {
            return Err(StrategySpaceError::InsufficientPlayers(
                strategy_counts.len(),
            ));
        }
        for (player, &count) in strategy_counts.iter().enumerate() {
            if count < MIN_STRATEGIES {
                return Err(StrategySpaceError::InvalidStrategyCount { player, count });
            }
        }

        let mut strides = vec![1usize; strategy_counts.len()];
        for i in (0..strategy_counts.len() - 1).rev() {
            strides[i] = strides[i + 1] * strategy_counts[i + 1];
        }
        let combinations: Vec<Combination> = strategy_counts
            .iter()
            .map(|&count| 0..count)
            .multi_cartesian_product()
            .collect();

        Ok(StrategySpace {
            strategy_counts: strategy_counts.to_vec(),
            strides,
            combinations,
        })
    }
    /// Number of joint outcomes
    pub fn len(&self) -> usize {
        self.combinations.len()
    }
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
    pub fn player_count(&self) -> usize {
        self.strategy_counts.len()
    }
    pub fn strategy_counts(&self) -> &[usize] {
        &self.strategy_counts
    }
    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }
    /// gets the joint outcome at `index`
    pub fn combination(&self, index: usize) -> &[usize] {
        assert!(index < self.combinations.len());
        &self.combinations[index]
    }
    /// Returns the position of a joint outcome in the space
    ///
    /// The combination must hold one 0-based strategy index per player
    pub fn index_of(&self, combination: &[usize]) -> Result<usize, StrategySpaceError> {
        if combination.len() != self.strategy_counts.len() {
            return Err(StrategySpaceError::UnmatchedCombination(
                combination.to_vec(),
            ));
        }
        let mut index = 0;
        for ((&strategy, &count), &stride) in combination
            .iter()
            .zip(&self.strategy_counts)
            .zip(&self.strides)
        {
            if strategy >= count {
                return Err(StrategySpaceError::UnmatchedCombination(
                    combination.to_vec(),
                ));
            }
            index += strategy * stride;
        }
        Ok(index)
    }
    /// Parses a label of 1-based strategy numbers, one per player, into a 0-based combination
    ///
    /// `"21"` means the first player plays its second strategy and the second player its first.
    /// Numbers may be separated by commas (`"10,2"`) when a player has more than 9 strategies.
    pub fn parse_label(&self, label: &str) -> Result<Combination, StrategySpaceError> {
        let unmatched = || StrategySpaceError::UnmatchedCombinationLabel(label.to_string());
        let numbers: Option<Vec<usize>> = if label.contains(',') {
            label
                .split(',')
                .map(|number| number.trim().parse::<usize>().ok())
                .collect()
        } else {
            label
                .chars()
                .map(|digit| digit.to_digit(10).map(|d| d as usize))
                .collect()
        };
        let numbers = numbers.ok_or_else(unmatched)?;
        if numbers.len() != self.strategy_counts.len() {
            return Err(unmatched());
        }
        let mut combination = Vec::with_capacity(numbers.len());
        for (number, &count) in numbers.into_iter().zip(&self.strategy_counts) {
            if number == 0 || number > count {
                return Err(unmatched());
            }
            combination.push(number - 1);
        }
        Ok(combination)
    }
    /// Returns the position of the joint outcome named by a label
    pub fn index_of_label(&self, label: &str) -> Result<usize, StrategySpaceError> {
        let combination = self.parse_label(label)?;
        self.index_of(&combination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_size() {
        let space = StrategySpace::build(&[2, 3, 4]).unwrap();
        assert_eq!(space.len(), 24);
        assert_eq!(space.player_count(), 3);
        assert_eq!(space.combination(0), &[0, 0, 0]);
        assert_eq!(space.combination(1), &[0, 0, 1]);
        assert_eq!(space.combination(4), &[0, 1, 0]);
        assert_eq!(space.combination(23), &[1, 2, 3]);
    }

    #[test]
    fn test_build_invalid() {
        assert_eq!(
            StrategySpace::build(&[3]).unwrap_err(),
            StrategySpaceError::InsufficientPlayers(1)
        );
        assert_eq!(
            StrategySpace::build(&[2, 1]).unwrap_err(),
            StrategySpaceError::InvalidStrategyCount {
                player: 1,
                count: 1
            }
        );
    }

    #[test]
    fn test_index_of_is_bijection() {
        let space = StrategySpace::build(&[3, 2, 2, 5]).unwrap();
        let mut seen = vec![false; space.len()];
        for (i, combination) in space.combinations().iter().enumerate() {
            let index = space.index_of(combination).unwrap();
            assert_eq!(index, i);
            assert!(!seen[index]);
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_index_of_unmatched() {
        let space = StrategySpace::build(&[2, 2]).unwrap();
        assert!(space.index_of(&[0, 2]).is_err());
        assert!(space.index_of(&[0]).is_err());
        assert!(space.index_of(&[1, 1, 0]).is_err());
    }

    #[test]
    fn test_labels() {
        let space = StrategySpace::build(&[3, 3]).unwrap();
        assert_eq!(space.parse_label("21").unwrap(), vec![1, 0]);
        assert_eq!(space.index_of_label("11").unwrap(), 0);
        assert_eq!(space.index_of_label("13").unwrap(), 2);
        assert_eq!(space.index_of_label("33").unwrap(), 8);
        assert_eq!(space.index_of_label("3,2").unwrap(), 7);
        for bad in &["", "1", "111", "14", "01", "a1", "1,x"] {
            assert_eq!(
                space.index_of_label(bad).unwrap_err(),
                StrategySpaceError::UnmatchedCombinationLabel(bad.to_string())
            );
        }
    }

    #[test]
    fn test_label_wide_player() {
        let space = StrategySpace::build(&[12, 2]).unwrap();
        assert_eq!(space.parse_label("11,2").unwrap(), vec![10, 1]);
        assert_eq!(space.index_of_label("12,1").unwrap(), 22);
    }
}
