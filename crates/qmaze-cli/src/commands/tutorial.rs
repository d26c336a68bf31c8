//! Guided tutorial walk-through

use std::io::{BufRead, Write};

use anyhow::Result;
use qmaze_core::flow::View;
use qmaze_core::tutorial::{Panel, Tour};
use qmaze_core::{MazeConfig, RunState, MAZE};

use crate::render;

pub fn run() -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    walk(stdin.lock(), &mut stdout)?;
    super::print_next(View::Tutorial);
    Ok(())
}

/// Show each tutorial step, reading one line between steps.
///
/// Empty line or `n` advances, `b` goes back, `q` skips the rest.
pub fn walk<R: BufRead, W: Write>(mut input: R, out: &mut W) -> Result<()> {
    let mut tour = Tour::new();
    let preview = RunState::new();

    writeln!(out, "{}", View::Tutorial.title())?;
    writeln!(out, "[Enter] next  [b] back  [q] skip\n")?;

    while let Some(step) = tour.current() {
        let (index, total) = tour.progress();
        writeln!(out, "({index}/{total}) {}", step.title)?;
        if let Some(panel) = step.target {
            writeln!(out, "--- {panel} ---")?;
            write!(out, "{}", panel_preview(panel, &preview, &MAZE))?;
        }
        writeln!(out, "{}\n", step.text)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        match line.trim().to_lowercase().as_str() {
            "b" | "back" => {
                tour.back();
            }
            "q" | "quit" | "skip" => tour.skip(),
            _ => {
                tour.advance();
            }
        }
    }

    writeln!(out, "Tutorial finished. You are ready to play.")?;
    Ok(())
}

fn panel_preview(panel: Panel, run: &RunState, maze: &MazeConfig) -> String {
    match panel {
        Panel::MazeGrid => render::maze_grid(run.position(), false),
        Panel::ControlPanel => format!(
            "        [↑ up]\n[← left]        [→ right]\n       [↓ down]\n\
             move rewards: wall/obstacle {}, move {}, exit +{}\n",
            maze.rewards.invalid, maze.rewards.step, maze.rewards.exit
        ),
        Panel::QTable => render::q_table(run.episode(), run.episode_log(run.episode()), None),
    }
}
