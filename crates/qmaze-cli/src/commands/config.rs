//! Configuration management commands

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use crate::config::Config;

const DEFAULT_FILE: &str = "qmaze.toml";

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Initialize configuration file in the current directory
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
    /// Print where records are stored
    Path,
}

pub fn run(cmd: ConfigCommands, cfg: &Config, explicit: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(cfg, explicit),
        ConfigCommands::Init { force } => {
            let target = Path::new(DEFAULT_FILE);
            if init(target, force)? {
                println!("Wrote {}", target.display());
            } else {
                println!("Configuration file already exists: {}", target.display());
                println!("Use --force to overwrite");
            }
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", cfg.data_dir().display());
            Ok(())
        }
    }
}

fn show(cfg: &Config, explicit: Option<&Path>) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    match Config::find_config_file(explicit) {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("No configuration file found. Using defaults."),
    }
    println!("Data directory: {}\n", cfg.data_dir().display());
    print!("{}", cfg.to_toml()?);
    Ok(())
}

/// Write the default configuration to `path`.
///
/// Returns `false` without touching the file when it exists and `force` is off.
pub fn init(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }

    let text = format!(
        "# QMaze configuration\n# Environment overrides use QMAZE_<SECTION>__<KEY>, e.g. QMAZE_LOGGING__LEVEL=debug\n\n{}",
        Config::default().to_toml()?
    );
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Configuration file written");
    Ok(true)
}
