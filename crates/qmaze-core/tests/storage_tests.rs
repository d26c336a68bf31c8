//! Integration tests for the file-backed store

use qmaze_core::storage::{self, FileStore, KeyValueStore, RUN_SUMMARY_KEY, TEAM_INFO_KEY};
use qmaze_core::{Action, MazeError, RunState, RunSummary, TeamInfo};
use tempfile::TempDir;

#[test]
fn test_team_info_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let team = TeamInfo::new("Owls", "Ada", "Ben", "Cho", "Dia");

    {
        let mut store = FileStore::open(dir.path()).unwrap();
        storage::save(&mut store, TEAM_INFO_KEY, &team).unwrap();
    }

    let store = FileStore::open(dir.path()).unwrap();
    let loaded: Option<TeamInfo> = storage::load(&store, TEAM_INFO_KEY).unwrap();
    assert_eq!(loaded, Some(team));
    assert!(dir.path().join("rl_maze_team_info.json").exists());
}

#[test]
fn test_open_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");

    let store = FileStore::open(&nested).unwrap();
    assert!(nested.is_dir());
    assert_eq!(store.root(), nested.as_path());
}

#[test]
fn test_corrupt_file_is_treated_as_absent() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("rl_maze_run_summary.json"), "[1, 2,").unwrap();

    let store = FileStore::open(dir.path()).unwrap();
    let loaded: Option<RunSummary> = storage::load(&store, RUN_SUMMARY_KEY).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_wrong_shape_is_treated_as_absent() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    store.put(TEAM_INFO_KEY, r#"{"team_name": 5}"#).unwrap();

    let loaded: Option<TeamInfo> = storage::load(&store, TEAM_INFO_KEY).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_summary_overwrites_previous() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();

    let mut run = RunState::new();
    run.take_action(Action::Right);
    let first = RunSummary::from_run(&run, "First");
    let second = RunSummary::from_run(&RunState::new(), "Second");

    storage::save(&mut store, RUN_SUMMARY_KEY, &first).unwrap();
    storage::save(&mut store, RUN_SUMMARY_KEY, &second).unwrap();

    let loaded: RunSummary = storage::load(&store, RUN_SUMMARY_KEY).unwrap().unwrap();
    assert_eq!(loaded.team_name, "Second");
    assert_eq!(loaded.episodes[0].steps_used, 0);
}

#[test]
fn test_remove_missing_key_is_ok() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    assert!(store.remove(TEAM_INFO_KEY).is_ok());
}

#[test]
fn test_path_like_keys_rejected() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();

    assert!(matches!(
        store.put("../escape", "{}"),
        Err(MazeError::Storage(_))
    ));
    assert!(matches!(store.get(""), Err(MazeError::Storage(_))));
}
