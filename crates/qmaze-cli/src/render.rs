//! Plain-text rendering of the board, the Q-table, and results

use std::fmt::Write as _;

use qmaze_core::{EpisodeSummary, Position, RunState, RunSummary, StepRecord, MAZE};

/// The 4x4 board with the current cell marked.
///
/// Exit and obstacles stay hidden unless `reveal` is set.
pub fn maze_grid(current: Position, reveal: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "    {}", (0..MAZE.size).map(|c| format!(" {c} ")).collect::<String>());

    for row in 0..MAZE.size {
        let _ = write!(out, " {row}  ");
        for col in 0..MAZE.size {
            let cell = Position::new(row, col);
            let mark = if cell == current {
                '@'
            } else if cell == MAZE.start {
                'S'
            } else if reveal && MAZE.is_exit(cell) {
                'E'
            } else if reveal && MAZE.is_obstacle(cell) {
                '#'
            } else {
                '.'
            };
            let _ = write!(out, "[{mark}]");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Current position: ({},{})", current.row, current.col);
    out
}

/// One line with episode, step, and score counters
pub fn status_line(run: &RunState) -> String {
    format!(
        "Episode {}/{} | Step {}/{} | Total score {}",
        run.episode(),
        MAZE.max_episodes,
        run.step(),
        MAZE.max_steps_per_episode,
        run.total_score()
    )
}

/// The Q-table of one episode. `current` marks the row awaiting input.
pub fn q_table(episode: usize, rows: &[StepRecord], current: Option<u32>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Q-table (episode {episode})");
    let _ = writeln!(
        out,
        "  {:<5} {:<6} {:<6} {:<11} {:>6} {:<6} {:>6}  {:<16} {:<8} {:<8}",
        "STEP", "STATE", "ACTION", "MOVE", "REWARD", "NEXT", "SCORE", "POLICY", "OPINION", "JUDGMENT"
    );
    let _ = writeln!(out, "  {}", "-".repeat(88));

    if rows.is_empty() {
        let _ = writeln!(out, "  (no steps yet)");
        return out;
    }

    for row in rows {
        let marker = if Some(row.step) == current { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:<5} {:<6} {:<6} {:<11} {:>6} {:<6} {:>6}  {:<16} {:<8} {:<8}",
            row.step,
            row.state.to_string(),
            row.action.to_string(),
            row.status.to_string(),
            row.reward,
            row.next_state.to_string(),
            row.total_score,
            row.policy,
            row.opinion_reflected.to_string(),
            row.policy_judgment.to_string(),
        );
    }
    out
}

/// Per-episode scores, best episode, and opinion reflection rate
pub fn run_stats(run: &RunState) -> String {
    let mut out = String::new();
    for (episode, _) in run.episodes() {
        let stats = run.episode_stats(episode);
        let _ = writeln!(
            out,
            "Episode {episode}: score {} ({} moves)",
            stats.score, stats.move_count
        );
    }
    match run.best_episode() {
        Some(best) => {
            let _ = writeln!(
                out,
                "Best episode: {} with {} points ({} moves)",
                best.episode, best.score, best.move_count
            );
        }
        None => {
            let _ = writeln!(out, "Best episode: none yet");
        }
    }
    let _ = writeln!(out, "Explorer opinion reflected: {}%", run.opinion_reflection_rate());
    out
}

/// Visited cells of one episode, numbered by the step that reached them
pub fn path_grid(episode: &EpisodeSummary) -> String {
    let mut out = String::new();
    for row in 0..MAZE.size {
        for col in 0..MAZE.size {
            let cell = Position::new(row, col);
            let label = if cell == MAZE.start {
                " S".to_string()
            } else {
                // The latest visit wins when a cell was entered more than once
                episode
                    .path
                    .iter()
                    .rev()
                    .find(|p| p.position() == cell)
                    .map_or_else(|| " .".to_string(), |p| format!("{:>2}", p.step_index))
            };
            let _ = write!(out, "[{label}]");
        }
        out.push('\n');
    }
    let _ = writeln!(out, "{}", if episode.success { "Success" } else { "Fail" });
    out
}

/// Full results view for a stored run summary
pub fn summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Results for team {}", summary.team_name);
    let _ = writeln!(
        out,
        "Played {}",
        summary.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(
        out,
        "Escaped in {} of {} episodes",
        summary.successes(),
        summary.episodes.len()
    );
    let _ = writeln!(
        out,
        "Explorer opinion reflected: {}% ({} of {} steps)\n",
        summary.opinion.rate, summary.opinion.reflected, summary.opinion.total
    );

    for (idx, episode) in summary.episodes.iter().enumerate() {
        let _ = writeln!(
            out,
            "Episode {}: {} steps, ending score {}",
            idx + 1,
            episode.steps_used,
            episode.ending_score
        );
        out.push_str(&path_grid(episode));
        out.push('\n');
    }
    out
}
