//! Write-once summary of a finished run, persisted for the results view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::maze::{MAX_EPISODES, MAZE};
use crate::run::RunState;
use crate::stats::percent;
use crate::types::{Position, RunId};

/// A visited cell, tagged with the step that reached it (0 for the start)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPoint {
    pub row: i32,
    pub col: i32,
    pub step_index: u32,
}

impl PathPoint {
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub steps_used: usize,
    pub ending_score: i32,
    pub success: bool,
    pub path: Vec<PathPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpinionTally {
    pub reflected: usize,
    pub total: usize,
    pub rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub team_name: String,
    pub created_at: DateTime<Utc>,
    pub opinion: OpinionTally,
    pub episodes: [EpisodeSummary; MAX_EPISODES],
}

impl RunSummary {
    /// Snapshot `run` as it stands now.
    pub fn from_run(run: &RunState, team_name: impl Into<String>) -> Self {
        let (reflected, total) = run.opinion_counts();

        let episodes = std::array::from_fn(|idx| {
            let episode = idx + 1;
            let rows = run.episode_log(episode);

            let mut path = vec![PathPoint {
                row: MAZE.start.row,
                col: MAZE.start.col,
                step_index: 0,
            }];
            path.extend(rows.iter().filter(|row| row.is_valid()).map(|row| PathPoint {
                row: row.next_state.row,
                col: row.next_state.col,
                step_index: row.step,
            }));

            EpisodeSummary {
                steps_used: rows.len(),
                ending_score: run.episode_stats(episode).score,
                success: rows.iter().any(|row| row.reward == MAZE.rewards.exit),
                path,
            }
        });

        Self {
            run_id: run.id(),
            team_name: team_name.into(),
            created_at: Utc::now(),
            opinion: OpinionTally {
                reflected,
                total,
                rate: percent(reflected, total),
            },
            episodes,
        }
    }

    /// Number of episodes that reached the exit
    pub fn successes(&self) -> usize {
        self.episodes.iter().filter(|e| e.success).count()
    }
}

impl RunState {
    /// Produce the run summary once the last episode has finished and every
    /// row of it is annotated.
    pub fn finalize(&self, team_name: impl Into<String>) -> Option<RunSummary> {
        if !self.is_complete() || !self.is_episode_input_complete(self.episode()) {
            return None;
        }
        Some(RunSummary::from_run(self, team_name))
    }
}
