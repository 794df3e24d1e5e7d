use nash_solver::game::RunOptions;
use nash_solver::scenarios::matching_pennies;
use std::error::Error;
use std::result::Result;

#[test]
fn test_matching_pennies_converges() -> Result<(), Box<dyn Error>> {
    let mut game = matching_pennies()?;
    game.initialize_strategies_with(vec![vec![0.8, 0.2], vec![0.3, 0.7]])?;
    let equilibrium = game.run(&RunOptions {
        iterations: 20_000,
        learning_rate: 1e-5,
        ..RunOptions::default()
    })?;
    println!("{}", equilibrium);

    assert_eq!(equilibrium.iterations, 20_000);
    for player in &equilibrium.players {
        for &p in &player.mixed_strategy {
            assert!((p - 0.5).abs() < 0.01, "{:?}", player.mixed_strategy);
        }
        assert!(player.regret.iter().all(|&r| r >= 0.0));
    }
    assert!(equilibrium.aggregate_regret < 12.0);
    // starting point is far from the equilibrium
    let trajectory = game.trajectory();
    assert!(trajectory.aggregate_regret()[0] > 100.0);
    Ok(())
}

#[test]
fn test_strategies_stay_on_simplex() -> Result<(), Box<dyn Error>> {
    let mut game = matching_pennies()?;
    game.initialize_strategies_with(vec![vec![0.99, 0.01], vec![0.05, 0.95]])?;
    game.run(&RunOptions {
        iterations: 5_000,
        learning_rate: 1e-4,
        ..RunOptions::default()
    })?;
    for player in game.players() {
        for iterate in player.history() {
            assert!((iterate.mixed_strategy.sum() - 1.0).abs() < 1e-9);
            assert!(iterate.mixed_strategy.iter().all(|&p| p >= 0.0));
        }
    }
    Ok(())
}
