/// min players allowed in a game
pub const MIN_PLAYERS: usize = 2;
/// min pure strategies a player must have
pub const MIN_STRATEGIES: usize = 2;
/// lower end of the range payoffs are rescaled onto before a run
pub const NORMALIZED_PAYOFF_MIN: f64 = -1000.0;
/// upper end of the range payoffs are rescaled onto before a run
pub const NORMALIZED_PAYOFF_MAX: f64 = 1000.0;
/// random payoffs are integers drawn from [low, high)
pub const RANDOM_PAYOFF_LOW: i64 = -1000;
pub const RANDOM_PAYOFF_HIGH: i64 = 1000;
/// random mixed strategies normalize integer weights drawn from [1, max)
pub const RANDOM_WEIGHT_MAX: u32 = 100;
/// decimals kept when rounding random mixed strategies and reports
pub const ROUND_DECIMALS: i32 = 4;
/// distance from 1 a custom mixed strategy may sum to
pub const SIMPLEX_TOLERANCE: f64 = 1e-6;
/// default number of rounds in a run
pub const DEFAULT_ITERATIONS: usize = 60_000;
/// default step size of the simplex update
pub const DEFAULT_LEARNING_RATE: f64 = 1e-5;

/// rounds `value` to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
