//! Session introduction

use anyhow::Result;
use qmaze_core::flow::View;
use qmaze_core::MAZE;

pub fn run() -> Result<()> {
    println!("{}", View::Start.title());
    println!("{}\n", "=".repeat(View::Start.title().len()));
    println!("Guide an agent out of a maze and experience Q-learning first hand.");
    println!(
        "Your team explores a {size}x{size} maze over {episodes} episodes of at most {steps} steps,",
        size = MAZE.size,
        episodes = MAZE.max_episodes,
        steps = MAZE.max_steps_per_episode
    );
    println!("recording every move in a Q-table and judging each decision.\n");

    println!("Session outline:");
    for (idx, view) in View::ALL.iter().enumerate() {
        println!("  {}. {:<9} {}", idx + 1, view.to_string(), view.title());
    }

    super::print_next(View::Start);
    Ok(())
}
