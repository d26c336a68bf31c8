//! Q-table rows and the learner annotations attached to them

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MazeError;
use crate::types::{Action, MoveStatus, Position};

/// Whether the explorer's suggestion was reflected in the chosen action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpinionReflected {
    #[default]
    Unset,
    Yes,
    No,
}

impl OpinionReflected {
    pub fn is_set(self) -> bool {
        self != OpinionReflected::Unset
    }
}

impl std::fmt::Display for OpinionReflected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpinionReflected::Unset => write!(f, "-"),
            OpinionReflected::Yes => write!(f, "O"),
            OpinionReflected::No => write!(f, "X"),
        }
    }
}

impl FromStr for OpinionReflected {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "o" => Ok(OpinionReflected::Yes),
            "no" | "n" | "x" => Ok(OpinionReflected::No),
            other => Err(MazeError::InvalidAnnotation(format!(
                "'{other}' (expected yes or no)"
            ))),
        }
    }
}

/// Hindsight judgment of whether a step was a good choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyJudgment {
    #[default]
    Unset,
    Good,
    Bad,
}

impl PolicyJudgment {
    pub fn is_set(self) -> bool {
        self != PolicyJudgment::Unset
    }
}

impl std::fmt::Display for PolicyJudgment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyJudgment::Unset => write!(f, "-"),
            PolicyJudgment::Good => write!(f, "good"),
            PolicyJudgment::Bad => write!(f, "bad"),
        }
    }
}

impl FromStr for PolicyJudgment {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "good" | "g" => Ok(PolicyJudgment::Good),
            "bad" | "b" => Ok(PolicyJudgment::Bad),
            other => Err(MazeError::InvalidAnnotation(format!(
                "'{other}' (expected good or bad)"
            ))),
        }
    }
}

/// One attempted action, as recorded in the episode's Q-table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub episode: usize,
    /// 1-based within the episode
    pub step: u32,
    pub state: Position,
    pub action: Action,
    pub status: MoveStatus,
    pub reward: i32,
    pub next_state: Position,
    /// Run-wide score after this step
    pub total_score: i32,
    pub policy: String,
    pub opinion_reflected: OpinionReflected,
    pub policy_judgment: PolicyJudgment,
}

impl StepRecord {
    pub fn is_valid(&self) -> bool {
        self.status == MoveStatus::Possible
    }

    /// Both learner annotations have been filled in
    pub fn is_annotated(&self) -> bool {
        self.opinion_reflected.is_set() && self.policy_judgment.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> StepRecord {
        StepRecord {
            episode: 1,
            step: 1,
            state: Position::new(0, 0),
            action: Action::Right,
            status: MoveStatus::Possible,
            reward: -1,
            next_state: Position::new(0, 1),
            total_score: -1,
            policy: "(0,0) → right".to_string(),
            opinion_reflected: OpinionReflected::Unset,
            policy_judgment: PolicyJudgment::Unset,
        }
    }

    #[test]
    fn test_annotation_defaults_unset() {
        assert_eq!(OpinionReflected::default(), OpinionReflected::Unset);
        assert_eq!(PolicyJudgment::default(), PolicyJudgment::Unset);
        assert!(!OpinionReflected::Unset.is_set());
        assert!(PolicyJudgment::Bad.is_set());
    }

    #[test]
    fn test_annotation_parsing() {
        assert_eq!("yes".parse::<OpinionReflected>().unwrap(), OpinionReflected::Yes);
        assert_eq!("O".parse::<OpinionReflected>().unwrap(), OpinionReflected::Yes);
        assert_eq!("x".parse::<OpinionReflected>().unwrap(), OpinionReflected::No);
        assert_eq!("Good".parse::<PolicyJudgment>().unwrap(), PolicyJudgment::Good);
        assert_eq!("b".parse::<PolicyJudgment>().unwrap(), PolicyJudgment::Bad);
        assert!(matches!(
            "maybe".parse::<OpinionReflected>(),
            Err(MazeError::InvalidAnnotation(_))
        ));
        assert!("".parse::<PolicyJudgment>().is_err());
    }

    #[test]
    fn test_is_annotated_requires_both_fields() {
        let mut record = sample_record();
        assert!(!record.is_annotated());

        record.opinion_reflected = OpinionReflected::No;
        assert!(!record.is_annotated());

        record.policy_judgment = PolicyJudgment::Good;
        assert!(record.is_annotated());
        assert!(record.is_valid());
    }

    #[test]
    fn test_record_serialization() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: StepRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, record);
        assert!(json.contains("\"opinion_reflected\":\"unset\""));
    }
}
