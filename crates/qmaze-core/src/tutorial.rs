//! Guided tour shown before the first real run
//!
//! Each step points at one panel of the play view and carries a short guide
//! text. [`Tour`] is a cursor over the fixed script.

use serde::Serialize;

/// Panel of the play view a tutorial step refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    MazeGrid,
    ControlPanel,
    QTable,
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Panel::MazeGrid => write!(f, "maze grid"),
            Panel::ControlPanel => write!(f, "control panel"),
            Panel::QTable => write!(f, "Q-table"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TutorialStep {
    /// `None` for steps that address the whole screen
    pub target: Option<Panel>,
    pub title: &'static str,
    pub text: &'static str,
}

pub static STEPS: [TutorialStep; 6] = [
    TutorialStep {
        target: None,
        title: "Welcome",
        text: "Your team is the agent. Find the hidden exit of a 4x4 maze in as few moves as possible.",
    },
    TutorialStep {
        target: Some(Panel::MazeGrid),
        title: "The maze",
        text: "You start at the top-left cell (0,0). The exit and three obstacles are hidden; \
               only your current cell is marked.",
    },
    TutorialStep {
        target: Some(Panel::ControlPanel),
        title: "Choosing a move",
        text: "Pick up, down, left or right. Hitting a wall or an obstacle costs 5 points and you \
               stay put, a normal move costs 1 point, and the exit is worth 10 points.",
    },
    TutorialStep {
        target: Some(Panel::QTable),
        title: "The Q-table",
        text: "Every move adds a row: state, action, whether the move was possible, reward, \
               next state and running score.",
    },
    TutorialStep {
        target: Some(Panel::QTable),
        title: "Annotating a row",
        text: "Before the next move, mark whether the explorer's opinion was reflected (O/X) and \
               whether the move was a good or bad policy.",
    },
    TutorialStep {
        target: None,
        title: "Episodes",
        text: "An episode ends at the exit or after 12 steps. You get three episodes; \
               your score carries over between them.",
    },
];

/// Cursor over [`STEPS`]
#[derive(Debug, Clone, Default)]
pub struct Tour {
    index: usize,
    finished: bool,
}

impl Tour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&'static TutorialStep> {
        if self.finished {
            return None;
        }
        STEPS.get(self.index)
    }

    /// 1-based position of the current step and the step count
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, STEPS.len())
    }

    /// Advance; moving past the last step finishes the tour.
    pub fn advance(&mut self) -> Option<&'static TutorialStep> {
        if self.index + 1 < STEPS.len() {
            self.index += 1;
        } else {
            self.finished = true;
        }
        self.current()
    }

    /// Step back; on a finished tour this reopens the last step.
    pub fn back(&mut self) -> Option<&'static TutorialStep> {
        if self.finished {
            self.finished = false;
        } else {
            self.index = self.index.saturating_sub(1);
        }
        self.current()
    }

    pub fn skip(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tour_walks_every_step() {
        let mut tour = Tour::new();
        let mut seen = vec![tour.current().unwrap().title];
        while let Some(step) = tour.advance() {
            seen.push(step.title);
        }

        assert_eq!(seen.len(), STEPS.len());
        assert!(tour.is_finished());
        assert!(tour.current().is_none());
    }

    #[test]
    fn test_back_from_first_step_stays() {
        let mut tour = Tour::new();
        assert_eq!(tour.back().unwrap().title, STEPS[0].title);
        assert_eq!(tour.progress(), (1, STEPS.len()));
    }

    #[test]
    fn test_back_reopens_finished_tour() {
        let mut tour = Tour::new();
        tour.skip();
        assert!(tour.is_finished());

        assert_eq!(tour.back().unwrap().title, STEPS[0].title);
        assert!(!tour.is_finished());

        while tour.advance().is_some() {}
        assert_eq!(tour.back().unwrap().title, STEPS[STEPS.len() - 1].title);
    }
}
