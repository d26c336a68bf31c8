//! Common types used throughout QMaze

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MazeError;

/// Run identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A grid cell as (row, column), 0-indexed from the top-left corner.
///
/// Coordinates are signed so that a step off the grid can be represented
/// before it is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell one unit away in the direction of `action`. Not bounds-checked.
    pub const fn step(self, action: Action) -> Self {
        let (dr, dc) = action.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// A move the team can choose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// (row delta, column delta)
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    pub const fn arrow(self) -> char {
        match self {
            Action::Up => '↑',
            Action::Down => '↓',
            Action::Left => '←',
            Action::Right => '→',
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Up => write!(f, "up"),
            Action::Down => write!(f, "down"),
            Action::Left => write!(f, "left"),
            Action::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Action {
    type Err = MazeError;

    /// Accepts the full direction name or its first letter, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" => Ok(Action::Up),
            "down" | "d" => Ok(Action::Down),
            "left" | "l" => Ok(Action::Left),
            "right" | "r" => Ok(Action::Right),
            other => Err(MazeError::InvalidAction(other.to_string())),
        }
    }
}

/// Whether an attempted move could be carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveStatus {
    Possible,
    Impossible,
}

impl std::fmt::Display for MoveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveStatus::Possible => write!(f, "possible"),
            MoveStatus::Impossible => write!(f, "impossible"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_step() {
        let origin = Position::new(1, 1);
        assert_eq!(origin.step(Action::Up), Position::new(0, 1));
        assert_eq!(origin.step(Action::Down), Position::new(2, 1));
        assert_eq!(origin.step(Action::Left), Position::new(1, 0));
        assert_eq!(origin.step(Action::Right), Position::new(1, 2));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 0).to_string(), "3,0");
        assert_eq!(Position::new(-1, 2).to_string(), "-1,2");
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("up".parse::<Action>().unwrap(), Action::Up);
        assert_eq!("D".parse::<Action>().unwrap(), Action::Down);
        assert_eq!(" Left ".parse::<Action>().unwrap(), Action::Left);
        assert_eq!("r".parse::<Action>().unwrap(), Action::Right);
        assert!(matches!(
            "north".parse::<Action>(),
            Err(MazeError::InvalidAction(_))
        ));
    }

    #[test]
    fn test_action_display_roundtrip() {
        for action in Action::ALL {
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_action_serialization() {
        let json = serde_json::to_string(&Action::Right).unwrap();
        assert_eq!(json, "\"right\"");
        let status = serde_json::to_string(&MoveStatus::Impossible).unwrap();
        assert_eq!(status, "\"impossible\"");
    }

    #[test]
    fn test_run_id_uniqueness() {
        assert_ne!(RunId::new(), RunId::new());
    }
}
