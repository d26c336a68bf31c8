//! Interactive play session
//!
//! Reads one command per line and applies it to a single run. Commands that
//! the run is not ready for are answered with a hint and otherwise ignored.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use qmaze_core::flow::View;
use qmaze_core::storage::{self, RUN_SUMMARY_KEY};
use qmaze_core::{Action, OpinionReflected, Phase, PolicyJudgment, RunState, RunSummary, MAZE};
use tracing::info;

use super::team;
use crate::config::Config;
use crate::render;

/// A single line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Action),
    /// Annotate a row of the current episode; the latest row when no step is given
    Opinion(OpinionReflected, Option<u32>),
    Judge(PolicyJudgment, Option<u32>),
    Next,
    Table(Option<usize>),
    Stats,
    Map,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            bail!("empty command");
        };
        let arg = words.next();
        let extra = words.next();

        let step = |raw: Option<&str>| -> Result<Option<u32>> {
            raw.map(|s| s.parse::<u32>().with_context(|| format!("'{s}' is not a step number")))
                .transpose()
        };

        let command = match head.to_lowercase().as_str() {
            "opinion" | "o" => {
                let value = arg.ok_or_else(|| anyhow!("usage: opinion <yes|no> [step]"))?;
                Command::Opinion(value.parse()?, step(extra)?)
            }
            "judge" | "j" => {
                let value = arg.ok_or_else(|| anyhow!("usage: judge <good|bad> [step]"))?;
                Command::Judge(value.parse()?, step(extra)?)
            }
            "next" | "n" => Command::Next,
            "table" | "t" => Command::Table(
                arg.map(|s| s.parse::<usize>().with_context(|| format!("'{s}' is not an episode number")))
                    .transpose()?,
            ),
            "stats" | "s" => Command::Stats,
            "map" | "m" => Command::Map,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => Command::Move(other.parse()?),
        };
        Ok(command)
    }
}

const HELP: &str = "\
Commands:
  up | down | left | right   choose a move (u, d, l, r for short)
  opinion <yes|no> [step]    was the explorer's opinion reflected? (o)
  judge <good|bad> [step]    was this a good policy? (j)
  next                       start the next episode once this one is done (n)
  table [episode]            show a Q-table (t)
  stats                      show scores so far (s)
  map                        show the maze (m)
  help                       this text
  quit                       leave without saving";

/// A run plus the display options used while playing it
pub struct Session {
    run: RunState,
    reveal_layout: bool,
}

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

impl Session {
    pub fn new(reveal_layout: bool) -> Self {
        Self {
            run: RunState::new(),
            reveal_layout,
        }
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    /// Read commands until the run is complete or input ends.
    ///
    /// Returns the summary when the run was completed.
    pub fn play<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
        team_name: &str,
    ) -> Result<Option<RunSummary>> {
        writeln!(out, "{}\n", View::Play.title())?;
        writeln!(out, "Type 'help' for the list of commands.\n")?;
        self.show_board(out)?;

        loop {
            if self.run.phase() == Phase::RunComplete {
                writeln!(out, "\nGame complete! Final score: {}", self.run.total_score())?;
                write!(out, "{}", render::run_stats(&self.run))?;
                return Ok(self.run.finalize(team_name));
            }

            write!(out, "{}\n> ", self.prompt())?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(None);
            }
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(out, "{e}. Type 'help' for commands.")?;
                    continue;
                }
            };

            if self.handle(command, out)? == Flow::Quit {
                return Ok(None);
            }
        }
    }

    fn prompt(&self) -> String {
        let hint = match self.run.phase() {
            Phase::AwaitingAction => "Choose a move.",
            Phase::AwaitingAnnotation => "Annotate the last step: opinion <yes|no> and judge <good|bad>.",
            Phase::EpisodeFinished => "Episode over. Type 'next' for the next episode.",
            Phase::RunComplete => "Run complete.",
        };
        format!("{} | {hint}", render::status_line(&self.run))
    }

    fn show_board<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}", render::maze_grid(self.run.position(), self.reveal_layout))?;
        Ok(())
    }

    fn show_table<W: Write>(&self, out: &mut W, episode: usize) -> Result<()> {
        let current = (episode == self.run.episode()).then(|| self.run.step());
        write!(out, "{}", render::q_table(episode, self.run.episode_log(episode), current))?;
        Ok(())
    }

    /// Explain why a move was not accepted
    fn refusal(&self) -> &'static str {
        if self.run.is_complete() {
            "The run is already complete."
        } else if self.run.phase() == Phase::AwaitingAnnotation {
            "Fill in both annotations for the last step before moving."
        } else if self.run.is_episode_finished(self.run.episode()) {
            "This episode is over. Type 'next' to continue."
        } else {
            "No more moves are allowed in this episode."
        }
    }

    fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        let episode = self.run.episode();

        match command {
            Command::Move(action) => {
                let report = self.run.take_action(action).map(|row| {
                    format!(
                        "Step {}: {} {} is {} (reward {:+}, total {})",
                        row.step,
                        action.arrow(),
                        action,
                        row.status,
                        row.reward,
                        row.total_score
                    )
                });
                let Some(report) = report else {
                    writeln!(out, "{}", self.refusal())?;
                    return Ok(Flow::Continue);
                };
                writeln!(out, "{report}")?;

                self.show_board(out)?;
                if self.run.is_exit_reached() {
                    writeln!(out, "You found the exit!")?;
                } else if self.run.is_max_steps_reached() {
                    writeln!(
                        out,
                        "Step limit of {} reached without finding the exit.",
                        MAZE.max_steps_per_episode
                    )?;
                }
                self.show_table(out, episode)?;
            }
            Command::Opinion(value, step) => {
                let step = step.unwrap_or(self.run.step());
                if self.run.set_opinion(episode, step, value) {
                    writeln!(out, "Step {step}: explorer opinion reflected = {value}")?;
                } else {
                    writeln!(out, "Episode {episode} has no step {step}.")?;
                }
            }
            Command::Judge(value, step) => {
                let step = step.unwrap_or(self.run.step());
                if self.run.set_judgment(episode, step, value) {
                    writeln!(out, "Step {step}: policy judged {value}")?;
                } else {
                    writeln!(out, "Episode {episode} has no step {step}.")?;
                }
            }
            Command::Next => {
                if self.run.advance_episode() {
                    writeln!(out, "\nEpisode {} begins. Back to the start.", self.run.episode())?;
                    self.show_board(out)?;
                } else if self.run.episode() >= MAZE.max_episodes {
                    writeln!(out, "This is the last episode.")?;
                } else {
                    writeln!(
                        out,
                        "Finish this episode and annotate every step before moving on."
                    )?;
                }
            }
            Command::Table(requested) => {
                let target = requested.unwrap_or(episode);
                if (1..=MAZE.max_episodes).contains(&target) {
                    self.show_table(out, target)?;
                } else {
                    writeln!(out, "Episodes are numbered 1 to {}.", MAZE.max_episodes)?;
                }
            }
            Command::Stats => write!(out, "{}", render::run_stats(&self.run))?,
            Command::Map => self.show_board(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {
                writeln!(out, "Leaving the game. This run is not saved.")?;
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }
}

pub fn run(cfg: &Config) -> Result<()> {
    let mut store = cfg.open_store()?;

    let team = team::load(&store)?.filter(|t| t.is_complete()).ok_or_else(|| {
        anyhow!("No team set up yet. Run `qmaze team set` first (see `qmaze team show`).")
    })?;

    let mut session = Session::new(cfg.display.reveal_layout);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    let Some(summary) = session.play(stdin.lock(), &mut stdout, &team.team_name)? else {
        return Ok(());
    };

    storage::save(&mut store, RUN_SUMMARY_KEY, &summary)?;
    info!(run = %summary.run_id, team = %summary.team_name, "Run summary saved");

    println!();
    print!("{}", render::summary(&summary));
    super::print_next(View::Result);
    Ok(())
}
