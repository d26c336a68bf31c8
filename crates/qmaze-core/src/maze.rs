//! The fixed maze and its move/reward rules
//!
//! The layout never changes at runtime. Exit and obstacle cells are hidden
//! from the players; the only feedback they get is whether a move was
//! possible and the reward it earned.

use serde::Serialize;

use crate::error::{MazeError, Result};
use crate::types::{Action, MoveStatus, Position};

/// Number of episodes in a run. Episode logs are stored in an array of this length.
pub const MAX_EPISODES: usize = 3;

/// Reward for each kind of move outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewardTable {
    /// Attempted move off the grid or into an obstacle
    pub invalid: i32,
    /// Ordinary move to a free cell
    pub step: i32,
    /// Move onto the exit cell
    pub exit: i32,
}

/// Layout and limits of the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MazeConfig {
    pub size: i32,
    pub start: Position,
    pub exit: Position,
    pub obstacles: [Position; 3],
    pub max_episodes: usize,
    pub max_steps_per_episode: u32,
    pub rewards: RewardTable,
}

/// The maze every run is played on
pub const MAZE: MazeConfig = MazeConfig {
    size: 4,
    start: Position::new(0, 0),
    exit: Position::new(1, 3),
    obstacles: [Position::new(3, 0), Position::new(1, 1), Position::new(0, 3)],
    max_episodes: MAX_EPISODES,
    max_steps_per_episode: 12,
    rewards: RewardTable {
        invalid: -5,
        step: -1,
        exit: 10,
    },
};

/// Result of checking a move against the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub valid: bool,
    pub status: MoveStatus,
    /// Where the agent ends up; the unchanged position when the move is invalid
    pub next_position: Position,
}

impl MazeConfig {
    pub fn in_bounds(&self, position: Position) -> bool {
        (0..self.size).contains(&position.row) && (0..self.size).contains(&position.col)
    }

    pub fn is_obstacle(&self, position: Position) -> bool {
        self.obstacles.contains(&position)
    }

    pub fn is_exit(&self, position: Position) -> bool {
        position == self.exit
    }

    /// Decide whether `action` can be taken from `position`.
    pub fn evaluate_move(&self, position: Position, action: Action) -> MoveOutcome {
        let candidate = position.step(action);

        if !self.in_bounds(candidate) || self.is_obstacle(candidate) {
            return MoveOutcome {
                valid: false,
                status: MoveStatus::Impossible,
                next_position: position,
            };
        }

        MoveOutcome {
            valid: true,
            status: MoveStatus::Possible,
            next_position: candidate,
        }
    }

    /// Reward for taking `action` from `position`, given its validity.
    pub fn compute_reward(&self, position: Position, action: Action, valid: bool) -> i32 {
        if !valid {
            return self.rewards.invalid;
        }
        if self.is_exit(position.step(action)) {
            return self.rewards.exit;
        }
        self.rewards.step
    }

    /// Check the layout invariants: start, exit and obstacles on the grid,
    /// and neither start nor exit blocked.
    pub fn validate(&self) -> Result<()> {
        if self.size <= 0 {
            return Err(MazeError::Config(format!("grid size {} must be positive", self.size)));
        }
        for cell in std::iter::once(&self.start)
            .chain(std::iter::once(&self.exit))
            .chain(self.obstacles.iter())
        {
            if !self.in_bounds(*cell) {
                return Err(MazeError::Config(format!("cell ({cell}) is outside the grid")));
            }
        }
        if self.is_obstacle(self.exit) {
            return Err(MazeError::Config("exit overlaps an obstacle".to_string()));
        }
        if self.is_obstacle(self.start) {
            return Err(MazeError::Config("start overlaps an obstacle".to_string()));
        }
        if self.max_episodes == 0 || self.max_steps_per_episode == 0 {
            return Err(MazeError::Config("episode and step limits must be positive".to_string()));
        }
        Ok(())
    }
}

/// [`MazeConfig::evaluate_move`] on the standard maze
pub fn evaluate_move(position: Position, action: Action) -> MoveOutcome {
    MAZE.evaluate_move(position, action)
}

/// [`MazeConfig::compute_reward`] on the standard maze
pub fn compute_reward(position: Position, action: Action, valid: bool) -> i32 {
    MAZE.compute_reward(position, action, valid)
}

/// Policy description shown in the Q-table, e.g. `(1,0) → down`
pub fn policy_string(position: Position, action: Action) -> String {
    format!("({},{}) → {}", position.row, position.col, action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_maze_is_valid() {
        assert!(MAZE.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blocked_exit() {
        let mut maze = MAZE;
        maze.obstacles[0] = maze.exit;
        assert!(matches!(maze.validate(), Err(MazeError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_off_grid_obstacle() {
        let mut maze = MAZE;
        maze.obstacles[2] = Position::new(4, 4);
        assert!(matches!(maze.validate(), Err(MazeError::Config(_))));
    }

    #[test]
    fn test_bounds() {
        assert!(MAZE.in_bounds(Position::new(0, 0)));
        assert!(MAZE.in_bounds(Position::new(3, 3)));
        assert!(!MAZE.in_bounds(Position::new(-1, 0)));
        assert!(!MAZE.in_bounds(Position::new(0, 4)));
    }

    #[test]
    fn test_move_into_obstacle_is_impossible() {
        let outcome = evaluate_move(Position::new(1, 0), Action::Right);
        assert!(!outcome.valid);
        assert_eq!(outcome.status, MoveStatus::Impossible);
        assert_eq!(outcome.next_position, Position::new(1, 0));
    }

    #[test]
    fn test_reward_table() {
        assert_eq!(compute_reward(Position::new(0, 0), Action::Up, false), -5);
        assert_eq!(compute_reward(Position::new(0, 0), Action::Right, true), -1);
        assert_eq!(compute_reward(Position::new(2, 3), Action::Up, true), 10);
    }

    #[test]
    fn test_policy_string() {
        assert_eq!(policy_string(Position::new(1, 0), Action::Down), "(1,0) → down");
    }
}
