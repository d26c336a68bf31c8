//! Team composition - four players sharing one run

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

/// Roles in a four-person team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    /// Two per team; agree on each move
    DecisionMaker,
    /// Suggests exploratory moves and rules on whether they were followed
    Explorer,
    /// Keeps the Q-table and its annotations up to date
    Recorder,
}

impl TeamRole {
    pub const ALL: [TeamRole; 3] = [TeamRole::DecisionMaker, TeamRole::Explorer, TeamRole::Recorder];

    /// What the role does during play
    pub fn duty(self) -> &'static str {
        match self {
            TeamRole::DecisionMaker => {
                "Discuss the direction (up, down, left, right) and make the final call, \
                 using the explorer's opinion and the Q-table."
            }
            TeamRole::Explorer => {
                "Decide whether the explorer's opinion was reflected (O/X): did the agents \
                 try a new path or stick with what they were sure of?"
            }
            TeamRole::Recorder => {
                "Record every step in the Q-table and enter the good/bad policy judgment \
                 the team agrees on."
            }
        }
    }
}

impl std::fmt::Display for TeamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamRole::DecisionMaker => write!(f, "decision maker"),
            TeamRole::Explorer => write!(f, "explorer"),
            TeamRole::Recorder => write!(f, "recorder"),
        }
    }
}

/// Names entered during team setup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub team_name: String,
    pub agent1: String,
    pub agent2: String,
    pub explorer: String,
    pub recorder: String,
}

impl TeamInfo {
    pub fn new(
        team_name: impl Into<String>,
        agent1: impl Into<String>,
        agent2: impl Into<String>,
        explorer: impl Into<String>,
        recorder: impl Into<String>,
    ) -> Self {
        Self {
            team_name: team_name.into(),
            agent1: agent1.into(),
            agent2: agent2.into(),
            explorer: explorer.into(),
            recorder: recorder.into(),
        }
    }

    /// (label, value) pairs in display order
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("team name", self.team_name.as_str()),
            ("agent 1", self.agent1.as_str()),
            ("agent 2", self.agent2.as_str()),
            ("explorer", self.explorer.as_str()),
            ("recorder", self.recorder.as_str()),
        ]
    }

    /// Members paired with their role
    pub fn members(&self) -> [(TeamRole, &str); 4] {
        [
            (TeamRole::DecisionMaker, self.agent1.as_str()),
            (TeamRole::DecisionMaker, self.agent2.as_str()),
            (TeamRole::Explorer, self.explorer.as_str()),
            (TeamRole::Recorder, self.recorder.as_str()),
        ]
    }

    /// Every field must be non-blank. The error names the first missing field.
    pub fn validate(&self) -> Result<()> {
        match self.fields().iter().find(|(_, value)| value.trim().is_empty()) {
            Some((label, _)) => Err(MazeError::IncompleteTeam((*label).to_string())),
            None => Ok(()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_team() -> TeamInfo {
        TeamInfo::new("Owls", "Ada", "Ben", "Cho", "Dia")
    }

    #[test]
    fn test_complete_team_validates() {
        assert!(full_team().validate().is_ok());
        assert!(full_team().is_complete());
    }

    #[test]
    fn test_blank_field_rejected() {
        let mut team = full_team();
        team.explorer = "   ".to_string();

        match team.validate() {
            Err(MazeError::IncompleteTeam(field)) => assert_eq!(field, "explorer"),
            other => panic!("Expected IncompleteTeam, got {other:?}"),
        }
    }

    #[test]
    fn test_default_team_reports_team_name_first() {
        let err = TeamInfo::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "Incomplete team: team name is required");
    }

    #[test]
    fn test_members_roles() {
        let team = full_team();
        let members = team.members();
        assert_eq!(members[0], (TeamRole::DecisionMaker, "Ada"));
        assert_eq!(members[2], (TeamRole::Explorer, "Cho"));
        assert_eq!(members[3], (TeamRole::Recorder, "Dia"));
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&TeamRole::DecisionMaker).unwrap();
        assert_eq!(json, "\"decision_maker\"");
        assert!(!TeamRole::Recorder.duty().is_empty());
    }
}
