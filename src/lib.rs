//! Approximate Nash equilibria of finite N-player normal-form games
//! by iterated regret minimization on mixed strategies.

extern crate rand;

/// Declare common crate modules for linking
pub mod constants;
pub mod strategy_space;
pub mod payoff;
pub mod snapshot;
pub mod player;
pub mod equilibrium;
pub mod game;
pub mod trajectory;
pub mod scenarios;
