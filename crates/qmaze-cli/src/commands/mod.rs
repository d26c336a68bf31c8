//! CLI command modules

pub mod config;
pub mod play;
pub mod result;
pub mod start;
pub mod team;
pub mod theory;
pub mod tutorial;

use qmaze_core::flow::View;

/// Point the user at the view that follows `current`
pub fn print_next(current: View) {
    if let Some(next) = current.next() {
        println!("\nNext: qmaze {next}  ({})", next.title());
    }
}
