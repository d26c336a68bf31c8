//! Statistics derived from a run. Nothing here is stored.

use serde::Serialize;

use crate::record::OpinionReflected;
use crate::run::RunState;

/// Final score and move count of one episode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EpisodeStats {
    pub score: i32,
    pub move_count: usize,
}

/// The highest-scoring episode of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BestEpisode {
    pub episode: usize,
    pub score: i32,
    pub move_count: usize,
}

/// Rounded `100 * part / whole`, halves rounding up. Zero when `whole` is zero.
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let rounded = (200 * part + whole) / (2 * whole);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Pick the highest score among episodes with at least one move.
///
/// `stats[i]` belongs to episode `i + 1`. On a tie the earlier episode wins.
pub fn best_of(stats: &[EpisodeStats]) -> Option<BestEpisode> {
    let mut best: Option<BestEpisode> = None;

    for (idx, s) in stats.iter().enumerate() {
        if s.move_count == 0 {
            continue;
        }
        if best.map_or(true, |b| s.score > b.score) {
            best = Some(BestEpisode {
                episode: idx + 1,
                score: s.score,
                move_count: s.move_count,
            });
        }
    }

    best
}

impl RunState {
    /// Cumulative score at the episode's last row and its row count
    pub fn episode_stats(&self, episode: usize) -> EpisodeStats {
        let rows = self.episode_log(episode);
        rows.last().map_or_else(EpisodeStats::default, |last| EpisodeStats {
            score: last.total_score,
            move_count: rows.len(),
        })
    }

    /// Episode with the highest final score among those with at least one
    /// move. On a tie the earlier episode wins.
    pub fn best_episode(&self) -> Option<BestEpisode> {
        let stats: Vec<EpisodeStats> = self
            .episodes()
            .map(|(episode, _)| self.episode_stats(episode))
            .collect();
        best_of(&stats)
    }

    /// (rows marked as reflecting the explorer's opinion, total rows) across all episodes
    pub fn opinion_counts(&self) -> (usize, usize) {
        self.episodes()
            .flat_map(|(_, rows)| rows.iter())
            .fold((0, 0), |(reflected, total), row| {
                let hit = usize::from(row.opinion_reflected == OpinionReflected::Yes);
                (reflected + hit, total + 1)
            })
    }

    /// Percentage of all rows whose opinion annotation is "yes"
    pub fn opinion_reflection_rate(&self) -> u32 {
        let (reflected, total) = self.opinion_counts();
        percent(reflected, total)
    }
}
