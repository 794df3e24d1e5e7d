use nash_solver::game::RunOptions;
use nash_solver::scenarios::shapley;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::error::Error;
use std::result::Result;

// Simultaneous regret updates cycle around the uniform equilibrium of this game
// instead of spiralling into it, so only the bookkeeping is checked from a random start.
#[test]
fn test_shapley_random_start() -> Result<(), Box<dyn Error>> {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut game = shapley()?;
    game.initialize_strategies(&mut rng);
    let equilibrium = game.run(&RunOptions {
        iterations: 10_000,
        ..RunOptions::default()
    })?;

    let aggregate = game.trajectory().aggregate_regret();
    assert_eq!(aggregate.len(), 10_000);
    assert!(equilibrium.aggregate_regret <= aggregate[0]);
    assert_eq!(aggregate[equilibrium.best_iteration], equilibrium.aggregate_regret);
    for player in &equilibrium.players {
        let sum: f64 = player.mixed_strategy.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(player.mixed_strategy.iter().all(|&p| p >= 0.0));
    }
    Ok(())
}

#[test]
fn test_shapley_near_uniform_start() -> Result<(), Box<dyn Error>> {
    let mut game = shapley()?;
    game.initialize_strategies_with(vec![vec![0.34, 0.33, 0.33], vec![0.33, 0.34, 0.33]])?;
    let equilibrium = game.run(&RunOptions {
        iterations: 10_000,
        ..RunOptions::default()
    })?;
    println!("{}", equilibrium);
    for player in &equilibrium.players {
        for &p in &player.mixed_strategy {
            assert!((p - 1.0 / 3.0).abs() < 0.011, "{:?}", player.mixed_strategy);
        }
    }
    Ok(())
}
