//! QMaze CLI - play the reinforcement-learning maze from a terminal
//!
//! The subcommands follow the order of a classroom session:
//! start, team, tutorial, play, result, theory.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::too_many_lines)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod render;

use commands::{config as config_cmd, play, result, start, team, theory, tutorial};

#[derive(Parser)]
#[command(name = "qmaze")]
#[command(author, version, about = "QMaze - learn reinforcement learning by escaping a maze", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a qmaze.toml configuration file
    #[arg(long, global = true, env = "QMAZE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Introduction and session overview
    Start,

    /// Team setup and roles
    #[command(subcommand)]
    Team(team::TeamCommands),

    /// Walk through the guided tutorial
    Tutorial,

    /// Play a run of three episodes
    Play,

    /// Show the results of the last finished run
    Result,

    /// Q-learning concepts behind the game
    Theory,

    /// Configuration management
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),
}

fn init_logging(cfg: &config::Config, verbose: bool) {
    let log_level = if verbose { "debug" } else { cfg.logging.level.as_str() };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("qmaze_cli={log_level},qmaze_core={log_level}").into());

    let json = cfg.logging.json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::Config::load(cli.config.as_deref())?;
    init_logging(&cfg, cli.verbose);

    match cli.command {
        Commands::Start => start::run(),
        Commands::Team(cmd) => team::run(cmd, &cfg),
        Commands::Tutorial => tutorial::run(),
        Commands::Play => play::run(&cfg),
        Commands::Result => result::run(&cfg),
        Commands::Theory => theory::run(),
        Commands::Config(cmd) => config_cmd::run(cmd, &cfg, cli.config.as_deref()),
    }
}
