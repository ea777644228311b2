//! # Wukong Roguelike Main Entry Point
//!
//! Parses the command line, routes logging to a file, checks the terminal and
//! runs one game on it.

use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};
use wukong::{
    GameOutcome, GameState, GenerationConfig, TerminalDisplay, TurnEngine, WukongError,
    WukongResult,
};

/// Command line arguments for the Wukong roguelike.
#[derive(Parser, Debug)]
#[command(name = "wukong")]
#[command(about = "A turn-based terminal roguelike starring the Monkey King")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file overriding generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// File receiving log output; the terminal belongs to the game screen
    #[arg(long, default_value = "wukong.log")]
    log_file: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = initialize_logging(&args) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    log::info!("Starting Wukong v{}", wukong::VERSION);

    match run(&args) {
        Ok(outcome) => {
            log::info!("Exiting with {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(WukongError::Configuration(message)) => {
            log::error!("{}", message);
            eprintln!("{}", message);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sends log records to the log file at the requested level.
fn initialize_logging(args: &Args) -> WukongResult<()> {
    let level = args
        .log_level
        .parse::<log::LevelFilter>()
        .map_err(|_| WukongError::Configuration(format!("Unknown log level {}", args.log_level)))?;
    let file = File::create(&args.log_file)?;

    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Builds the generation settings from the config file and the seed flag.
///
/// Without a config file the seed comes from the clock; `--seed` always wins.
fn load_config(args: &Args) -> WukongResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::new(time_seed()),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

fn run(args: &Args) -> WukongResult<GameOutcome> {
    TerminalDisplay::ensure_minimum_size()?;

    let config = load_config(args)?;
    log::info!("Generating dungeon level with seed: {}", config.seed);
    let game_state = GameState::new(&config)?;

    let mut display = TerminalDisplay::new();
    display.enter()?;
    let mut engine = TurnEngine::new(game_state, display);
    let outcome = engine.run();

    let (_, mut display) = engine.into_parts();
    display.exit()?;
    outcome
}
