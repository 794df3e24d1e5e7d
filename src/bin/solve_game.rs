use clap::{Parser, Subcommand};
use colored::*;
use nash_solver::game::{Game, RunOptions, StopCriterion};
use nash_solver::scenarios;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;
use std::result::Result;
use tracing::info;

#[derive(Parser)]
#[clap(version = "1.0", author = "Kyle <kmurf1999@gmail.com>")]
struct Opts {
    #[clap(subcommand)]
    game: GameKind,
    /// maximum number of rounds
    #[clap(long, default_value = "60000")]
    iterations: usize,
    /// simplex update step size
    #[clap(long, default_value = "0.00001")]
    rate: f64,
    /// seed for random payoffs and starting strategies
    #[clap(long)]
    seed: Option<u64>,
    /// evaluate players on worker threads
    #[clap(long)]
    parallel: bool,
    /// stop once aggregate regret stays below this value
    #[clap(long)]
    threshold: Option<f64>,
    /// consecutive rounds below the threshold before stopping
    #[clap(long, default_value = "1")]
    patience: usize,
    /// starting strategies, players separated by '/', e.g. "0.8,0.2/0.3,0.7"
    #[clap(long)]
    init: Option<String>,
    /// write the strategy paths of every player to this file as json
    #[clap(long)]
    trajectory: Option<PathBuf>,
}

#[derive(Subcommand)]
enum GameKind {
    MatchingPennies,
    Shapley,
    Bimatrix,
    ThreePlayer,
    /// random integer payoffs
    Random {
        /// pure strategy count of every player, e.g. "2,3,4"
        #[clap(long, default_value = "2,2")]
        strategies: String,
    },
}

fn parse_list<T: std::str::FromStr>(list: &str) -> Result<Vec<T>, Box<dyn Error>>
where
    T::Err: Error + 'static,
{
    let mut values = Vec::new();
    for item in list.split(',') {
        values.push(item.trim().parse::<T>()?);
    }
    Ok(values)
}

fn parse_strategies(init: &str) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    init.split('/').map(parse_list::<f64>).collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    let opts: Opts = Opts::parse();

    let mut rng = match opts.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let mut game: Game = match &opts.game {
        GameKind::MatchingPennies => scenarios::matching_pennies()?,
        GameKind::Shapley => scenarios::shapley()?,
        GameKind::Bimatrix => scenarios::bimatrix()?,
        GameKind::ThreePlayer => scenarios::three_player()?,
        GameKind::Random { strategies } => {
            let counts = parse_list::<usize>(strategies)?;
            scenarios::random(&counts, &mut rng)?
        }
    };
    match &opts.init {
        Some(init) => game.initialize_strategies_with(parse_strategies(init)?)?,
        None => game.initialize_strategies(&mut rng),
    }

    let options = RunOptions {
        iterations: opts.iterations,
        learning_rate: opts.rate,
        parallel: opts.parallel,
        stop: opts.threshold.map(|threshold| StopCriterion {
            threshold,
            patience: opts.patience,
        }),
    };
    let equilibrium = game.run(&options)?;

    println!("{}", "Nash equilibrium approximation".green().bold());
    println!("{}", equilibrium);
    println!(
        "best round {} of {}",
        equilibrium.best_iteration.to_string().yellow(),
        equilibrium.iterations
    );

    if let Some(path) = &opts.trajectory {
        std::fs::write(path, game.trajectory().to_json()?)?;
        info!("trajectory written to {}", path.display());
    }
    Ok(())
}
