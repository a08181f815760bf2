//! # Heatseeker Main Entry Point
//!
//! Loads configuration, starts the leaderboard service, and runs a text session
//! on standard input and output.

use clap::Parser;
use heatseeker::{
    GameConfig, GameSession, GameState, HeatseekerError, HeatseekerResult, InMemoryLeaderboard,
    LeaderboardClient,
};
use log::{error, info};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// How long to wait for the leaderboard when the session ends.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Command line arguments for Heatseeker.
#[derive(Parser, Debug)]
#[command(name = "heatseeker")]
#[command(about = "Cross the board guided only by the heat of hidden lava")]
#[command(version)]
struct Args {
    /// Random seed for lava generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Level to start on (1-based), for practice
    #[arg(short, long)]
    level: Option<usize>,

    /// Let the automated player take the run
    #[arg(long)]
    autoplay: bool,

    /// Name to submit to the leaderboard
    #[arg(long)]
    name: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> HeatseekerResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Heatseeker v{}", heatseeker::VERSION);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return Err(err);
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let _guard = runtime.enter();

    let (client, _task) =
        LeaderboardClient::spawn(InMemoryLeaderboard::with_limit(config.leaderboard_size));

    let seed = config.seed.unwrap_or_else(heatseeker::generation::utils::entropy_seed);
    info!("Using seed {}", seed);

    let mut game_state = GameState::new(config.catalog()?, seed)?;
    if let Some(level) = args.level {
        let index = level.checked_sub(1).ok_or_else(|| {
            HeatseekerError::Configuration("levels are numbered from 1".to_string())
        })?;
        game_state.start_practice(index)?;
    }

    let mut session = GameSession::new(game_state, client, &config);
    if args.autoplay {
        session.enable_autoplay();
    }

    let stdin = io::stdin();
    session.run(stdin.lock(), io::stdout())?;

    runtime.block_on(async {
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, session.finish(io::stdout())).await {
            Ok(result) => result,
            Err(_) => {
                error!("Leaderboard did not answer in time");
                Ok(())
            }
        }
    })
}

/// Reads the configuration file, if any, and applies command line overrides.
fn load_config(args: &Args) -> HeatseekerResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::from_file(path)?
        }
        None => GameConfig::default(),
    };

    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.name.is_some() {
        config.player_name = args.name.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }
}
