//! Per-round strategy paths for plotting
//!
//! Rendering happens elsewhere; this module only shapes the history of a run into series a
//! plotter can draw. Players with two pure strategies are drawn as their first probability over
//! time, players with three as a path inside the 2-simplex triangle.
use crate::player::PlayerState;
use serde::Serialize;
use std::result::Result;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrajectoryError {
    #[error("player {0} does not exist")]
    UnknownPlayer(usize),
    #[error("player {player} uses {found} pure strategies, the projection needs {expected}")]
    StrategyCountMismatch {
        player: usize,
        expected: usize,
        found: usize,
    },
}

/// Maps a point of the 3-simplex onto the equilateral triangle
/// with corners (0, 0), (√2/2, √6/2) and (√2, 0)
pub fn barycentric_to_cartesian(point: &[f64]) -> (f64, f64) {
    assert_eq!(point.len(), 3);
    let xs = [0.0, 2f64.sqrt() / 2.0, 2f64.sqrt()];
    let ys = [0.0, 6f64.sqrt() / 2.0, 0.0];
    let x: f64 = point.iter().zip(&xs).map(|(p, x)| p * x).sum();
    let y: f64 = point.iter().zip(&ys).map(|(p, y)| p * y).sum();
    (x, y)
}

/// 2D drawing of one player's path
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "points", rename_all = "snake_case")]
pub enum Projection {
    /// probability of the first pure strategy in every round
    Line(Vec<f64>),
    /// triangle coordinates in every round
    Triangle(Vec<(f64, f64)>),
}

#[derive(Serialize, Debug, Clone)]
pub struct PlayerTrajectory {
    pub strategy_count: usize,
    /// mixed strategy at the start of every round
    pub path: Vec<Vec<f64>>,
    /// regret sum measured in every round
    pub regret_sums: Vec<f64>,
    /// present for players with two or three pure strategies
    pub projection: Option<Projection>,
}

impl PlayerTrajectory {
    fn from_player(player: &PlayerState) -> Self {
        let path: Vec<Vec<f64>> = player
            .history()
            .iter()
            .map(|iterate| iterate.mixed_strategy.to_vec())
            .collect();
        let regret_sums = player.history().iter().map(|i| i.regret_sum()).collect();
        let projection = match player.strategy_count() {
            2 => Some(Projection::Line(path.iter().map(|p| p[0]).collect())),
            3 => Some(Projection::Triangle(
                path.iter().map(|p| barycentric_to_cartesian(p)).collect(),
            )),
            _ => None,
        };
        PlayerTrajectory {
            strategy_count: player.strategy_count(),
            path,
            regret_sums,
            projection,
        }
    }
}

/// History of every player since their last initialization
#[derive(Serialize, Debug, Clone)]
pub struct Trajectory {
    pub players: Vec<PlayerTrajectory>,
}

impl Trajectory {
    pub fn from_players(players: &[PlayerState]) -> Self {
        Trajectory {
            players: players.iter().map(PlayerTrajectory::from_player).collect(),
        }
    }
    /// number of recorded rounds
    pub fn len(&self) -> usize {
        self.players.first().map_or(0, |p| p.path.len())
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// sum of all players' regret in every round
    pub fn aggregate_regret(&self) -> Vec<f64> {
        (0..self.len())
            .map(|t| self.players.iter().map(|p| p.regret_sums[t]).sum())
            .collect()
    }
    fn checked(
        &self,
        player: usize,
        expected: usize,
    ) -> Result<&PlayerTrajectory, TrajectoryError> {
        let trajectory = self
            .players
            .get(player)
            .ok_or(TrajectoryError::UnknownPlayer(player))?;
        if trajectory.strategy_count != expected {
            return Err(TrajectoryError::StrategyCountMismatch {
                player,
                expected,
                found: trajectory.strategy_count,
            });
        }
        Ok(trajectory)
    }
    /// first-coordinate series of a player with two pure strategies
    pub fn line(&self, player: usize) -> Result<Vec<f64>, TrajectoryError> {
        let trajectory = self.checked(player, 2)?;
        Ok(trajectory.path.iter().map(|p| p[0]).collect())
    }
    /// triangle path of a player with three pure strategies
    pub fn triangle(&self, player: usize) -> Result<Vec<(f64, f64)>, TrajectoryError> {
        let trajectory = self.checked(player, 3)?;
        Ok(trajectory
            .path
            .iter()
            .map(|p| barycentric_to_cartesian(p))
            .collect())
    }
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::PayoffTable;
    use crate::snapshot::ProfileSnapshot;
    use crate::strategy_space::StrategySpace;

    #[test]
    fn test_barycentric_corners() {
        let (x, y) = barycentric_to_cartesian(&[1.0, 0.0, 0.0]);
        assert_eq!((x, y), (0.0, 0.0));
        let (x, y) = barycentric_to_cartesian(&[0.0, 0.0, 1.0]);
        assert!((x - 2f64.sqrt()).abs() < 1e-12 && y == 0.0);
        let (x, y) = barycentric_to_cartesian(&[1.0 / 3.0; 3]);
        assert!((x - 2f64.sqrt() / 2.0).abs() < 1e-12);
        assert!((y - 6f64.sqrt() / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_players() {
        let space = StrategySpace::build(&[2, 3]).unwrap();
        let first = PayoffTable::from_values(vec![1.0, 0.0, 2.0, 0.0, 3.0, 1.0]);
        let second = PayoffTable::from_values(vec![0.0, 1.0, 0.0, 2.0, 0.0, 1.0]);
        let mut players = vec![PlayerState::new(2).unwrap(), PlayerState::new(3).unwrap()];
        players[0].init_mixed_strategy(vec![0.5, 0.5]).unwrap();
        players[1].init_mixed_strategy(vec![0.2, 0.3, 0.5]).unwrap();
        for _ in 0..3 {
            let snapshot = ProfileSnapshot::capture(&players).unwrap();
            players[0]
                .run_one_iteration(0, &snapshot, &space, &first, 0.1)
                .unwrap();
            players[1]
                .run_one_iteration(1, &snapshot, &space, &second, 0.1)
                .unwrap();
        }
        let trajectory = Trajectory::from_players(&players);
        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.line(0).unwrap()[0], 0.5);
        assert_eq!(trajectory.triangle(1).unwrap().len(), 3);
        assert_eq!(
            trajectory.line(1).unwrap_err(),
            TrajectoryError::StrategyCountMismatch {
                player: 1,
                expected: 2,
                found: 3
            }
        );
        assert_eq!(
            trajectory.triangle(2).unwrap_err(),
            TrajectoryError::UnknownPlayer(2)
        );
        let aggregate = trajectory.aggregate_regret();
        assert_eq!(aggregate.len(), 3);
        assert!(aggregate.iter().all(|&r| r >= 0.0));

        let json = trajectory.to_json().unwrap();
        assert!(json.contains("\"kind\":\"line\""));
        assert!(json.contains("\"kind\":\"triangle\""));
    }
}
