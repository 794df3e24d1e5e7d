//! Ready-made games
//!
//! Payoffs are written with the 1-based labels accepted by `Game::assign_payoff_label`,
//! one table per player.
use crate::game::{Game, GameError};
use rand::Rng;
use std::result::Result;

/// Payoffs of one player, keyed by joint outcome label
type LabelledPayoffs<'a> = &'a [(&'a str, f64)];

fn labelled(strategy_counts: &[usize], payoffs: &[LabelledPayoffs]) -> Result<Game, GameError> {
    let mut game = Game::new();
    for &count in strategy_counts {
        game.join(count)?;
    }
    for (player, table) in payoffs.iter().enumerate() {
        for &(label, value) in table.iter() {
            game.assign_payoff_label(player, label, value)?;
        }
    }
    Ok(game)
}

/// Matching pennies: the first player wins on a match, the second on a mismatch.
/// The unique equilibrium is (1/2, 1/2) for both.
pub fn matching_pennies() -> Result<Game, GameError> {
    labelled(
        &[2, 2],
        &[
            &[("11", 1.0), ("12", -1.0), ("21", -1.0), ("22", 1.0)],
            &[("11", -1.0), ("12", 1.0), ("21", 1.0), ("22", -1.0)],
        ],
    )
}

/// Shapley's rock-paper-scissors variant with bimatrix
///
/// ```text
/// [0, 0, 1]   [0, 1, 0]
/// [1, 0, 0]   [0, 0, 1]
/// [0, 1, 0]   [1, 0, 0]
/// ```
///
/// The unique equilibrium is (1/3, 1/3, 1/3) for both players.
pub fn shapley() -> Result<Game, GameError> {
    labelled(
        &[3, 3],
        &[
            &[
                ("11", 0.0),
                ("12", 0.0),
                ("13", 1.0),
                ("21", 1.0),
                ("22", 0.0),
                ("23", 0.0),
                ("31", 0.0),
                ("32", 1.0),
                ("33", 0.0),
            ],
            &[
                ("11", 0.0),
                ("12", 1.0),
                ("13", 0.0),
                ("21", 0.0),
                ("22", 0.0),
                ("23", 1.0),
                ("31", 1.0),
                ("32", 0.0),
                ("33", 0.0),
            ],
        ],
    )
}

/// A general-sum 3x3 bimatrix game
pub fn bimatrix() -> Result<Game, GameError> {
    labelled(
        &[3, 3],
        &[
            &[
                ("11", -231.0),
                ("12", -505.0),
                ("13", 525.0),
                ("21", -552.0),
                ("22", 831.0),
                ("23", -928.0),
                ("31", -74.0),
                ("32", -96.0),
                ("33", -604.0),
            ],
            &[
                ("11", 175.0),
                ("12", -350.0),
                ("13", -770.0),
                ("21", -641.0),
                ("22", -222.0),
                ("23", -189.0),
                ("31", 302.0),
                ("32", 504.0),
                ("33", 767.0),
            ],
        ],
    )
}

/// Three players with two strategies each
pub fn three_player() -> Result<Game, GameError> {
    labelled(
        &[2, 2, 2],
        &[
            &[
                ("111", 4.0),
                ("121", 3.0),
                ("211", 5.0),
                ("221", 5.0),
                ("112", 4.0),
                ("122", 5.0),
                ("212", 8.0),
                ("222", 4.0),
            ],
            &[
                ("111", 5.0),
                ("121", 2.0),
                ("211", 3.0),
                ("221", 4.0),
                ("112", 6.0),
                ("122", 3.0),
                ("212", 2.0),
                ("222", 3.0),
            ],
            &[
                ("111", 3.0),
                ("121", 5.0),
                ("211", 2.0),
                ("221", 4.0),
                ("112", 2.0),
                ("122", 4.0),
                ("212", 6.0),
                ("222", 5.0),
            ],
        ],
    )
}

/// A game over the given strategy counts with uniformly random integer payoffs
pub fn random<R: Rng + ?Sized>(strategy_counts: &[usize], rng: &mut R) -> Result<Game, GameError> {
    let mut game = Game::new();
    for &count in strategy_counts {
        game.join(count)?;
    }
    game.assign_random_payoffs(rng)?;
    Ok(game)
}
