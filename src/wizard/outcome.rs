// ABOUTME: Result values returned by wizard operations for the host to display
// ABOUTME: Covers transitions, movement analyses, plan generation, and rating progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use serde::{Deserialize, Serialize};

use super::WizardState;
use crate::models::{MovementKind, MovementResult};

/// A completed state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// State before the operation
    pub from: WizardState,
    /// State after the operation
    pub to: WizardState,
}

/// Result of one movement upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MovementOutcome {
    /// Analysis folded into the assessment
    Analyzed {
        /// Movement screened
        kind: MovementKind,
        /// Service result
        result: MovementResult,
        /// The clip had already been analyzed; no service call was made
        reused: bool,
    },
    /// Analysis failed; the assessment is unchanged
    Failed {
        /// Movement screened
        kind: MovementKind,
        /// Retry message for the user
        message: String,
        /// Underlying failure, for logs
        reason: String,
    },
}

impl MovementOutcome {
    /// Whether the movement now counts as performed
    #[must_use]
    pub const fn is_analyzed(&self) -> bool {
        matches!(self, Self::Analyzed { .. })
    }
}

/// Result of generating a plan on entry to the exercise step or on regenerate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanOutcome {
    /// A non-empty plan is ready
    Ready {
        /// Number of exercises
        exercises: usize,
    },
    /// Nothing usable was produced; the user should regenerate
    Empty {
        /// Message for the user
        message: String,
    },
}

impl PlanOutcome {
    /// Whether a plan is available
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Rating progress after recording feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackProgress {
    /// Exercises rated so far
    pub rated: usize,
    /// Exercises in the plan
    pub total: usize,
    /// Next exercise to perform, if any
    pub next_exercise: Option<String>,
}

impl FeedbackProgress {
    /// Whether every exercise has been rated
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.rated >= self.total
    }
}
