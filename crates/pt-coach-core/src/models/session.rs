// ABOUTME: Immutable session snapshot appended to history when a session ends
// ABOUTME: Captures profile, final assessment, plan, feedback, and the derived next plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    AssessmentAggregate, ExerciseFeedback, ExercisePlan, PainLevel, PlanAdjustment, UserProfile,
};

/// Snapshot of one completed session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique record identifier
    pub id: Uuid,
    /// When the session finished
    pub timestamp: DateTime<Utc>,
    /// Profile the session ran with
    pub profile: UserProfile,
    /// Final assessment
    pub assessment: AssessmentAggregate,
    /// Pain reported after the exercises
    pub post_session_pain: PainLevel,
    /// Free-text answer about how the pain responded
    pub pain_response: String,
    /// Plan that was performed
    pub plan: ExercisePlan,
    /// Ratings for each performed exercise
    pub feedback: Vec<ExerciseFeedback>,
    /// Classification computed from the ratings
    pub adjustment: PlanAdjustment,
    /// Plan suggested for the next session
    pub next_plan: ExercisePlan,
}
