//! astra-engine CLI
//!
//! Runs the engine over JSON documents and prints JSON results:
//!
//! 1. `layout`: score, rank, truncate by tier, place and cull a universe
//! 2. `score`: ranked per-dimension breakdowns for every candidate
//! 3. `replay`: feed recorded touch frames through the gesture recognizer

use astra_engine::config::Settings;
use astra_engine::models::{GestureReplayRequest, RequestError, UniverseRequest};
use astra_engine::services::Engine;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Affinity scoring and spatial layout for the discovery universe
///
/// Examples:
///   astra-engine layout --input universe.json
///   astra-engine score --input universe.json --pretty
///   astra-engine replay --input session.json
#[derive(Parser, Debug)]
#[command(name = "astra-engine")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Configuration file, replacing config/default.toml and config/local.toml
    ///
    /// ASTRA__* environment variables still apply on top.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a viewer's universe
    Layout {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Report ranked score breakdowns
    Score {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Replay recorded touch frames
    Replay {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(&Settings::default());
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&settings);
    info!("Configuration loaded successfully");

    match run(&cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, settings: &Settings) -> Result<(), CliError> {
    let engine = Engine::from_settings(settings);

    match &cli.command {
        Command::Layout { input } => {
            let request = UniverseRequest::from_path(input)?;
            emit(&engine.universe(request), cli.pretty)
        }
        Command::Score { input } => {
            let request = UniverseRequest::from_path(input)?;
            emit(&engine.scores(request), cli.pretty)
        }
        Command::Replay { input } => {
            let request = GestureReplayRequest::from_path(input)?;
            emit(&engine.replay(&request), cli.pretty)
        }
    }
}

/// Write a result to stdout; logs go to stderr
fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", output);
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}
