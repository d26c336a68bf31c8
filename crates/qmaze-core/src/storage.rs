//! Key-value persistence for team info and run summaries
//!
//! Records are stored as JSON strings. A record that fails to parse is
//! treated as absent so a damaged file never blocks a new session.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{MazeError, Result};

/// Key under which the team setup is stored
pub const TEAM_INFO_KEY: &str = "rl_maze_team_info";

/// Key under which the latest run summary is stored
pub const RUN_SUMMARY_KEY: &str = "rl_maze_run_summary";

/// Raw string store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Load and decode the record at `key`.
///
/// Missing and undecodable records both come back as `None`.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        debug!(key, "No stored record");
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key, error = %e, "Ignoring malformed stored record");
            Ok(None)
        }
    }
}

/// Encode `value` and write it at `key`, replacing any previous record.
pub fn save<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(value)?;
    store.put(key, &raw)?;
    info!(key, "Record saved");
    Ok(())
}

/// One `<key>.json` file per record inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| {
            MazeError::Storage(format!("cannot create {}: {e}", root.display()))
        })?;
        Ok(Self { root })
    }

    /// Default location: the user's data directory, or `./.qmaze` when unknown
    pub fn default_root() -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join("qmaze"))
            .unwrap_or_else(|| PathBuf::from(".qmaze"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(MazeError::Storage(format!("invalid key '{key}'")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MazeError::Storage(format!("cannot read {}: {e}", path.display()))),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::write(&path, value)
            .map_err(|e| MazeError::Storage(format!("cannot write {}: {e}", path.display())))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MazeError::Storage(format!("cannot remove {}: {e}", path.display()))),
        }
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::TeamInfo;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        let team = TeamInfo::new("Owls", "Ada", "Ben", "Cho", "Dia");

        save(&mut store, TEAM_INFO_KEY, &team).unwrap();
        let loaded: Option<TeamInfo> = load(&store, TEAM_INFO_KEY).unwrap();

        assert_eq!(loaded, Some(team));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        let loaded: Option<TeamInfo> = load(&store, TEAM_INFO_KEY).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_malformed_record_is_none() {
        let mut store = MemoryStore::new();
        store.put(TEAM_INFO_KEY, "{not json").unwrap();

        let loaded: Option<TeamInfo> = load(&store, TEAM_INFO_KEY).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_remove() {
        let mut store = MemoryStore::new();
        store.put("k", "v").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }
}
