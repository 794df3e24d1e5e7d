use nash_solver::game::{GameError, RunOptions};
use nash_solver::player::PlayerError;
use nash_solver::scenarios::{random, three_player};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::error::Error;
use std::result::Result;

#[test]
fn test_six_players() -> Result<(), Box<dyn Error>> {
    let mut rng = SmallRng::seed_from_u64(2021);
    let mut game = random(&[2; 6], &mut rng)?;
    assert_eq!(game.space().map(|s| s.len()), Some(64));
    game.initialize_strategies(&mut rng);
    let equilibrium = game.run(&RunOptions {
        iterations: 500,
        ..RunOptions::default()
    })?;
    assert_eq!(equilibrium.players.len(), 6);
    for player in 0..6 {
        let table = game.payoff_table(player).ok_or("missing payoff table")?;
        assert_eq!(table.len(), 64);
        assert!((table.max() - 1000.0).abs() < 1e-9);
        assert!((table.min() + 1000.0).abs() < 1e-9);
    }
    Ok(())
}

#[test]
fn test_parallel_three_players() -> Result<(), Box<dyn Error>> {
    let mut game = three_player()?;
    game.initialize_strategies_with(vec![vec![0.5, 0.5], vec![0.1, 0.9], vec![0.7, 0.3]])?;
    let mut parallel_game = game.clone();
    let options = RunOptions {
        iterations: 3_000,
        ..RunOptions::default()
    };
    let sequential = game.run(&options)?;
    let parallel = parallel_game.run(&RunOptions {
        parallel: true,
        ..options
    })?;
    assert_eq!(sequential, parallel);
    Ok(())
}

#[test]
fn test_invalid_initial_strategy() -> Result<(), Box<dyn Error>> {
    let mut game = three_player()?;
    let err = game
        .initialize_strategies_with(vec![vec![0.5, 0.5], vec![0.6, 0.6], vec![1.0, 0.0]])
        .unwrap_err();
    match err {
        GameError::Player {
            player: 1,
            source: PlayerError::NotOnSimplex(_),
        } => {}
        other => panic!("unexpected error {:?}", other),
    }
    Ok(())
}
