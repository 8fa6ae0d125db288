// ABOUTME: Classifies per-exercise feedback into regress, hold, or progress buckets
// ABOUTME: Output is advisory prompt input for the next exercise suggestion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use serde::{Deserialize, Serialize};

use crate::models::{Difficulty, ExerciseFeedback, PlanAdjustment};

/// Bucket a single feedback entry falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentBucket {
    /// Make easier next time
    Regress,
    /// Keep as is
    Hold,
    /// Make harder next time
    Progress,
}

/// Classify one rating. Increased pain always regresses, whatever the difficulty.
#[must_use]
pub const fn classify_feedback(feedback: &ExerciseFeedback) -> AdjustmentBucket {
    if feedback.pain_increased {
        return AdjustmentBucket::Regress;
    }
    match feedback.difficulty {
        Difficulty::Easy => AdjustmentBucket::Regress,
        Difficulty::JustRight => AdjustmentBucket::Hold,
        Difficulty::Hard => AdjustmentBucket::Progress,
    }
}

/// Classify every rating of a session
///
/// Each exercise text appears once per bucket; repeated ratings of the same
/// exercise into the same bucket are collapsed.
#[must_use]
pub fn compute_plan_adjustment(feedbacks: &[ExerciseFeedback]) -> PlanAdjustment {
    let mut adjustment = PlanAdjustment::default();
    for feedback in feedbacks {
        let bucket = match classify_feedback(feedback) {
            AdjustmentBucket::Regress => &mut adjustment.regress,
            AdjustmentBucket::Hold => &mut adjustment.hold_same,
            AdjustmentBucket::Progress => &mut adjustment.progress,
        };
        if !bucket.contains(&feedback.exercise) {
            bucket.push(feedback.exercise.clone());
        }
    }
    adjustment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(exercise: &str, pain_increased: bool, difficulty: Difficulty) -> ExerciseFeedback {
        ExerciseFeedback {
            exercise: exercise.to_owned(),
            pain_increased,
            difficulty,
        }
    }

    #[test]
    fn test_pain_forces_regress_even_when_hard() {
        let entry = feedback("Step-ups", true, Difficulty::Hard);
        assert_eq!(classify_feedback(&entry), AdjustmentBucket::Regress);
    }

    #[test]
    fn test_buckets_by_difficulty() {
        let adjustment = compute_plan_adjustment(&[
            feedback("Heel raises", false, Difficulty::Easy),
            feedback("Bridges", false, Difficulty::JustRight),
            feedback("Step-ups", false, Difficulty::Hard),
        ]);
        assert_eq!(adjustment.regress, vec!["Heel raises"]);
        assert_eq!(adjustment.hold_same, vec!["Bridges"]);
        assert_eq!(adjustment.progress, vec!["Step-ups"]);
    }
}
