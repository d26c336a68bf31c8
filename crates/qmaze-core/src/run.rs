//! Run state machine - one team session of three episodes
//!
//! Every mutation is a direct response to a single user event. Actions that
//! arrive when the run is not ready for them are dropped; callers can ask
//! [`RunState::can_act`] up front instead of inspecting a result.

use tracing::{debug, info};

use crate::maze::{policy_string, MAX_EPISODES, MAZE};
use crate::record::{OpinionReflected, PolicyJudgment, StepRecord};
use crate::types::{Action, Position, RunId};

/// Where the run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The team can choose the next move
    AwaitingAction,
    /// The latest row needs both annotations before play continues
    AwaitingAnnotation,
    /// The current episode ended and is fully annotated; ready to advance
    EpisodeFinished,
    /// The last episode ended and is fully annotated
    RunComplete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::AwaitingAction => write!(f, "awaiting action"),
            Phase::AwaitingAnnotation => write!(f, "awaiting annotation"),
            Phase::EpisodeFinished => write!(f, "episode finished"),
            Phase::RunComplete => write!(f, "run complete"),
        }
    }
}

/// In-memory state of a run
#[derive(Debug, Clone)]
pub struct RunState {
    id: RunId,
    position: Position,
    /// 1-based
    episode: usize,
    /// Steps taken in the current episode
    step: u32,
    total_score: i32,
    complete: bool,
    logs: [Vec<StepRecord>; MAX_EPISODES],
}

impl RunState {
    pub fn new() -> Self {
        Self {
            id: RunId::new(),
            position: MAZE.start,
            episode: 1,
            step: 0,
            total_score: 0,
            complete: false,
            logs: Default::default(),
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn episode(&self) -> usize {
        self.episode
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn total_score(&self) -> i32 {
        self.total_score
    }

    /// The last episode has finished (annotations may still be pending)
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Rows of `episode` in the order they were recorded. Empty for unknown episodes.
    pub fn episode_log(&self, episode: usize) -> &[StepRecord] {
        match Self::log_index(episode) {
            Some(idx) => &self.logs[idx],
            None => &[],
        }
    }

    /// All episode logs as (episode number, rows)
    pub fn episodes(&self) -> impl Iterator<Item = (usize, &[StepRecord])> {
        self.logs
            .iter()
            .enumerate()
            .map(|(idx, rows)| (idx + 1, rows.as_slice()))
    }

    /// The most recent row of the current episode
    pub fn latest_record(&self) -> Option<&StepRecord> {
        self.episode_log(self.episode).last()
    }

    fn log_index(episode: usize) -> Option<usize> {
        (1..=MAX_EPISODES).contains(&episode).then(|| episode - 1)
    }

    fn current_step_annotated(&self) -> bool {
        self.step == 0 || self.latest_record().is_some_and(StepRecord::is_annotated)
    }

    /// Whether an action would be accepted right now
    pub fn can_act(&self) -> bool {
        !self.complete
            && self.current_step_annotated()
            && self.step < MAZE.max_steps_per_episode
            && !self.is_episode_finished(self.episode)
    }

    /// Apply `action` to the current episode.
    ///
    /// Returns the recorded row, or `None` when the action was dropped.
    pub fn take_action(&mut self, action: Action) -> Option<&StepRecord> {
        if !self.can_act() {
            debug!(
                episode = self.episode,
                step = self.step,
                %action,
                "Action ignored, run not ready"
            );
            return None;
        }

        let outcome = MAZE.evaluate_move(self.position, action);
        let reward = MAZE.compute_reward(self.position, action, outcome.valid);
        let step = self.step + 1;
        let total_score = self.total_score + reward;

        let record = StepRecord {
            episode: self.episode,
            step,
            state: self.position,
            action,
            status: outcome.status,
            reward,
            next_state: outcome.next_position,
            total_score,
            policy: policy_string(self.position, action),
            opinion_reflected: OpinionReflected::Unset,
            policy_judgment: PolicyJudgment::Unset,
        };

        debug!(
            episode = self.episode,
            step,
            from = %self.position,
            to = %outcome.next_position,
            reward,
            "Step recorded"
        );

        self.position = outcome.next_position;
        self.step = step;
        self.total_score = total_score;

        let idx = self.episode - 1;
        self.logs[idx].push(record);

        if self.is_episode_finished(self.episode) {
            info!(
                episode = self.episode,
                steps = step,
                score = total_score,
                exit = self.is_exit_reached(),
                "Episode finished"
            );
            if self.episode >= MAZE.max_episodes {
                self.complete = true;
                info!(score = total_score, "Run complete");
            }
        }

        self.logs[idx].last()
    }

    fn row_mut(&mut self, episode: usize, step: u32) -> Option<&mut StepRecord> {
        let idx = Self::log_index(episode)?;
        self.logs[idx].iter_mut().find(|row| row.step == step)
    }

    /// Set the opinion-reflected annotation of a row. Returns `false` if the row does not exist.
    pub fn set_opinion(&mut self, episode: usize, step: u32, value: OpinionReflected) -> bool {
        match self.row_mut(episode, step) {
            Some(row) => {
                row.opinion_reflected = value;
                true
            }
            None => false,
        }
    }

    /// Set the policy-judgment annotation of a row. Returns `false` if the row does not exist.
    pub fn set_judgment(&mut self, episode: usize, step: u32, value: PolicyJudgment) -> bool {
        match self.row_mut(episode, step) {
            Some(row) => {
                row.policy_judgment = value;
                true
            }
            None => false,
        }
    }

    /// The episode reached the exit or used its last step
    pub fn is_episode_finished(&self, episode: usize) -> bool {
        self.episode_log(episode)
            .iter()
            .any(|row| row.reward == MAZE.rewards.exit || row.step >= MAZE.max_steps_per_episode)
    }

    /// Every row of the episode carries both annotations
    pub fn is_episode_input_complete(&self, episode: usize) -> bool {
        let rows = self.episode_log(episode);
        !rows.is_empty() && rows.iter().all(StepRecord::is_annotated)
    }

    /// The current episode ended on the exit cell
    pub fn is_exit_reached(&self) -> bool {
        self.latest_record()
            .is_some_and(|row| row.reward == MAZE.rewards.exit)
    }

    /// The current episode ended on the step cap without reaching the exit
    pub fn is_max_steps_reached(&self) -> bool {
        self.is_episode_finished(self.episode) && !self.is_exit_reached()
    }

    pub fn can_advance(&self) -> bool {
        self.is_episode_finished(self.episode)
            && self.is_episode_input_complete(self.episode)
            && self.episode < MAZE.max_episodes
    }

    /// Move to the next episode, keeping the score and earlier logs.
    ///
    /// Returns `false` (and changes nothing) unless [`RunState::can_advance`].
    pub fn advance_episode(&mut self) -> bool {
        if !self.can_advance() {
            debug!(episode = self.episode, "Advance ignored, episode not done");
            return false;
        }

        self.episode += 1;
        self.position = MAZE.start;
        self.step = 0;
        info!(episode = self.episode, score = self.total_score, "Starting episode");
        true
    }

    pub fn phase(&self) -> Phase {
        if !self.current_step_annotated() {
            return Phase::AwaitingAnnotation;
        }
        if self.complete {
            return Phase::RunComplete;
        }
        if self.is_episode_finished(self.episode) {
            return Phase::EpisodeFinished;
        }
        Phase::AwaitingAction
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotate_latest(run: &mut RunState) {
        let (episode, step) = {
            let row = run.latest_record().unwrap();
            (row.episode, row.step)
        };
        assert!(run.set_opinion(episode, step, OpinionReflected::Yes));
        assert!(run.set_judgment(episode, step, PolicyJudgment::Good));
    }

    #[test]
    fn test_new_run() {
        let run = RunState::new();
        assert_eq!(run.position(), Position::new(0, 0));
        assert_eq!(run.episode(), 1);
        assert_eq!(run.step(), 0);
        assert_eq!(run.total_score(), 0);
        assert!(run.can_act());
        assert_eq!(run.phase(), Phase::AwaitingAction);
    }

    #[test]
    fn test_valid_step_recorded() {
        let mut run = RunState::new();
        let row = run.take_action(Action::Right).unwrap().clone();

        assert_eq!(row.episode, 1);
        assert_eq!(row.step, 1);
        assert_eq!(row.state, Position::new(0, 0));
        assert_eq!(row.next_state, Position::new(0, 1));
        assert_eq!(row.reward, -1);
        assert_eq!(row.total_score, -1);
        assert_eq!(row.policy, "(0,0) → right");
        assert_eq!(run.position(), Position::new(0, 1));
    }

    #[test]
    fn test_unannotated_step_blocks_next_action() {
        let mut run = RunState::new();
        run.take_action(Action::Right);

        assert_eq!(run.phase(), Phase::AwaitingAnnotation);
        assert!(!run.can_act());
        assert!(run.take_action(Action::Right).is_none());
        assert_eq!(run.episode_log(1).len(), 1);

        // Half an annotation is not enough
        run.set_opinion(1, 1, OpinionReflected::No);
        assert!(run.take_action(Action::Right).is_none());

        run.set_judgment(1, 1, PolicyJudgment::Bad);
        assert!(run.take_action(Action::Right).is_some());
    }

    #[test]
    fn test_annotation_on_missing_row() {
        let mut run = RunState::new();
        assert!(!run.set_opinion(1, 1, OpinionReflected::Yes));
        assert!(!run.set_judgment(4, 1, PolicyJudgment::Good));
    }

    #[test]
    fn test_exit_finishes_episode_and_blocks_actions() {
        let mut run = RunState::new();
        for action in [Action::Right, Action::Right, Action::Down, Action::Right] {
            run.take_action(action).unwrap();
            annotate_latest(&mut run);
        }

        assert!(run.is_exit_reached());
        assert!(run.is_episode_finished(1));
        assert!(!run.is_max_steps_reached());
        assert_eq!(run.phase(), Phase::EpisodeFinished);
        assert!(!run.can_act());
        assert!(run.take_action(Action::Left).is_none());
        assert_eq!(run.episode_log(1).len(), 4);
    }

    #[test]
    fn test_advance_requires_finished_and_annotated_episode() {
        let mut run = RunState::new();
        assert!(!run.advance_episode());

        for action in [Action::Right, Action::Right, Action::Down, Action::Right] {
            run.take_action(action).unwrap();
            if run.is_episode_finished(1) {
                assert!(!run.advance_episode());
            }
            annotate_latest(&mut run);
        }

        let score = run.total_score();
        assert!(run.advance_episode());
        assert_eq!(run.episode(), 2);
        assert_eq!(run.step(), 0);
        assert_eq!(run.position(), Position::new(0, 0));
        assert_eq!(run.total_score(), score);
        assert_eq!(run.episode_log(1).len(), 4);
        assert!(run.can_act());
    }

    #[test]
    fn test_episode_log_out_of_range() {
        let run = RunState::new();
        assert!(run.episode_log(0).is_empty());
        assert!(run.episode_log(4).is_empty());
    }
}
