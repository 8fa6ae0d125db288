// ABOUTME: Exclusively owned per-user wizard data passed by &mut into every operation
// ABOUTME: Splits transient cycle fields from the history that survives restarts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use super::WizardState;
use crate::history::SessionHistory;
use crate::models::{
    AssessmentAggregate, ExerciseFeedback, ExercisePlan, MovementKind, MovementResult, UserProfile,
};

/// All data for one user's assessment cycle plus their history
///
/// Everything except the history is transient and cleared on restart,
/// abandon, and after a session is recorded.
#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    pub(super) id: Uuid,
    pub(super) state: WizardState,
    pub(super) profile: Option<UserProfile>,
    pub(super) aggregate: AssessmentAggregate,
    pub(super) pain_flags: Vec<String>,
    pub(super) safety_override: bool,
    pub(super) performed: BTreeSet<MovementKind>,
    pub(super) analyzed_clips: BTreeMap<(String, MovementKind), MovementResult>,
    pub(super) plan: ExercisePlan,
    pub(super) feedback: Vec<ExerciseFeedback>,
    pub(super) reassessment: bool,
    pub(super) history: SessionHistory,
}

impl WizardSession {
    /// Fresh session at Intake with empty history
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            ..Self::default()
        }
    }

    /// Fresh session continuing an existing history
    #[must_use]
    pub fn with_history(history: SessionHistory) -> Self {
        Self {
            history,
            ..Self::new()
        }
    }

    /// Identifier of the current cycle, used to correlate log events
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Current step
    #[must_use]
    pub const fn state(&self) -> WizardState {
        self.state
    }

    /// Profile captured at intake, or reused for a reassessment
    #[must_use]
    pub const fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Running assessment
    #[must_use]
    pub const fn aggregate(&self) -> &AssessmentAggregate {
        &self.aggregate
    }

    /// Triggered red flags and synthetic flags, in order raised
    #[must_use]
    pub fn pain_flags(&self) -> &[String] {
        &self.pain_flags
    }

    /// Whether the user explicitly chose to continue despite flags
    #[must_use]
    pub const fn safety_override(&self) -> bool {
        self.safety_override
    }

    /// Movements successfully analyzed this cycle
    #[must_use]
    pub const fn performed_movements(&self) -> &BTreeSet<MovementKind> {
        &self.performed
    }

    /// Current exercise plan
    #[must_use]
    pub const fn plan(&self) -> &ExercisePlan {
        &self.plan
    }

    /// Ratings recorded so far, in plan order
    #[must_use]
    pub fn feedback(&self) -> &[ExerciseFeedback] {
        &self.feedback
    }

    /// Index of the exercise awaiting a rating
    #[must_use]
    pub fn exercise_index(&self) -> usize {
        self.feedback.len()
    }

    /// Exercise awaiting a rating
    #[must_use]
    pub fn current_exercise(&self) -> Option<&str> {
        self.plan.get(self.exercise_index())
    }

    /// Whether this cycle started from a reassessment offer
    #[must_use]
    pub const fn is_reassessment(&self) -> bool {
        self.reassessment
    }

    /// Completed sessions
    #[must_use]
    pub const fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Clear every transient field and return to Intake; history is kept
    pub(super) fn reset_transient(&mut self) {
        let history = std::mem::take(&mut self.history);
        *self = Self::with_history(history);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_history_and_changes_id() {
        let mut session = WizardSession::new();
        let first_id = session.id();
        session.state = WizardState::SessionEnd;
        session.pain_flags.push("flag".to_owned());
        session.safety_override = true;
        session.performed.insert(MovementKind::Walking);

        session.reset_transient();

        assert_eq!(session.state(), WizardState::Intake);
        assert!(session.pain_flags().is_empty());
        assert!(!session.safety_override());
        assert!(session.performed_movements().is_empty());
        assert_ne!(session.id(), first_id);
    }
}
