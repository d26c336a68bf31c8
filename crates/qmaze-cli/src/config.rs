//! Configuration loading for the QMaze CLI
//!
//! The maze itself is fixed; configuration only covers where records are
//! stored, how logs are written, and what the board shows.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{ConfigBuilder, Environment, File};
use qmaze_core::storage::FileStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for team and result records; the platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Draw the exit and obstacles on the board (instructor mode)
    pub reveal_layout: bool,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = Self::find_config_file(explicit);

        let mut builder = ConfigBuilder::<config::builder::DefaultState>::default();

        if let Some(path) = &config_path {
            tracing::debug!("Loading config from: {:?}", path);
            builder = builder.add_source(File::from(path.clone()).required(false));
        }

        // Environment variables with QMAZE_ prefix, e.g. QMAZE_LOGGING__LEVEL=debug
        builder = builder.add_source(
            Environment::with_prefix("QMAZE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Find the configuration file
    pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
        // Check in order: --config / QMAZE_CONFIG, ./qmaze.toml, ~/.config/qmaze/qmaze.toml
        if let Some(path) = explicit {
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        let local = PathBuf::from("qmaze.toml");
        if local.exists() {
            return Some(local);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config").join("qmaze").join("qmaze.toml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }

    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(FileStore::default_root)
    }

    pub fn open_store(&self) -> Result<FileStore> {
        let dir = self.data_dir();
        FileStore::open(&dir).with_context(|| format!("Failed to open data directory {}", dir.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.logging.level, "warn");
        assert!(!cfg.logging.json);
        assert!(!cfg.display.reveal_layout);
        assert!(cfg.storage.data_dir.is_none());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qmaze.toml");
        std::fs::write(
            &path,
            r#"
[storage]
data_dir = "/tmp/qmaze-test"

[display]
reveal_layout = true
"#,
        )
        .unwrap();

        let cfg = Config::load(Some(&path)).unwrap();
        assert_eq!(cfg.data_dir(), PathBuf::from("/tmp/qmaze-test"));
        assert!(cfg.display.reveal_layout);
        // Sections missing from the file keep their defaults
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn test_default_toml_parses_back() {
        let text = Config::default().to_toml().unwrap();
        assert!(text.contains("[logging]"));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.logging.level, "warn");
        assert!(parsed.storage.data_dir.is_none());
    }

    #[test]
    fn test_open_store_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.storage.data_dir = Some(dir.path().join("records"));

        let store = cfg.open_store().unwrap();
        assert!(store.root().is_dir());
    }
}
