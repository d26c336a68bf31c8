//! QMaze Core - maze rules, episode bookkeeping, and shared types
//!
//! This crate provides everything the front ends need to run a team session:
//! the fixed maze, the move/reward rules, the run state machine that records
//! the annotated Q-table, and the persisted team and summary records.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod flow;
pub mod maze;
pub mod record;
pub mod run;
pub mod stats;
pub mod storage;
pub mod summary;
pub mod team;
pub mod tutorial;
pub mod types;

pub use error::{MazeError, Result};
pub use maze::{compute_reward, evaluate_move, MazeConfig, MoveOutcome, MAZE};
pub use record::{OpinionReflected, PolicyJudgment, StepRecord};
pub use run::{Phase, RunState};
pub use stats::{BestEpisode, EpisodeStats};
pub use summary::{EpisodeSummary, OpinionTally, PathPoint, RunSummary};
pub use team::{TeamInfo, TeamRole};
pub use types::*;
