//! Order in which a session visits its views

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Start,
    Team,
    Tutorial,
    Play,
    Result,
    Theory,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Start,
        View::Team,
        View::Tutorial,
        View::Play,
        View::Result,
        View::Theory,
    ];

    fn index(self) -> usize {
        match self {
            View::Start => 0,
            View::Team => 1,
            View::Tutorial => 2,
            View::Play => 3,
            View::Result => 4,
            View::Theory => 5,
        }
    }

    pub fn next(self) -> Option<View> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<View> {
        self.index().checked_sub(1).map(|idx| Self::ALL[idx])
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Start => "Learning reinforcement learning with a maze",
            View::Team => "Team setup and rules",
            View::Tutorial => "Guided tutorial",
            View::Play => "Maze explorer",
            View::Result => "Game results",
            View::Theory => "Q-learning concepts",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Start => write!(f, "start"),
            View::Team => write!(f, "team"),
            View::Tutorial => write!(f, "tutorial"),
            View::Play => write!(f, "play"),
            View::Result => write!(f, "result"),
            View::Theory => write!(f, "theory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_order() {
        let mut walked = vec![View::Start];
        let mut view = View::Start;
        while let Some(next) = view.next() {
            walked.push(next);
            view = next;
        }
        assert_eq!(walked, View::ALL.to_vec());
    }

    #[test]
    fn test_ends() {
        assert_eq!(View::Start.previous(), None);
        assert_eq!(View::Theory.next(), None);
        assert_eq!(View::Play.previous(), Some(View::Tutorial));
        assert_eq!(View::Play.next(), Some(View::Result));
    }
}
