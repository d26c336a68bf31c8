//! Error types for QMaze

use thiserror::Error;

/// Main error type for QMaze
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid annotation: {0}")]
    InvalidAnnotation(String),

    #[error("Incomplete team: {0} is required")]
    IncompleteTeam(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for QMaze operations
pub type Result<T> = std::result::Result<T, MazeError>;
