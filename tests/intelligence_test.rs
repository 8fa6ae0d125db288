// ABOUTME: Integration tests for assessment aggregation and plan adjustment rules
// ABOUTME: Exercises the folds as the wizard uses them across a whole session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use std::collections::BTreeSet;

use common::movement_result;
use pt_coach::intelligence::{
    classify_feedback, compute_plan_adjustment, derive_weakness_from_pain, fold_movement_result,
    record_pain_areas, zero_contribution, AdjustmentBucket,
};
use pt_coach::models::{AssessmentAggregate, Difficulty, ExerciseFeedback, FallRisk, MovementKind};

fn rating(exercise: &str, pain_increased: bool, difficulty: Difficulty) -> ExerciseFeedback {
    ExerciseFeedback {
        exercise: exercise.to_owned(),
        pain_increased,
        difficulty,
    }
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_fall_risk_never_decreases_across_movements() {
    let sequence = [
        (MovementKind::Walking, FallRisk::Medium),
        (MovementKind::Squatting, FallRisk::High),
        (MovementKind::Balance, FallRisk::Low),
    ];
    let mut aggregate = AssessmentAggregate::default();
    let mut seen = Vec::new();
    for (kind, risk) in sequence {
        aggregate = fold_movement_result(&aggregate, &movement_result(&[], risk), kind);
        seen.push(aggregate.fall_risk);
    }
    assert_eq!(seen, vec![FallRisk::Medium, FallRisk::High, FallRisk::High]);
    assert_eq!(aggregate.metrics.len(), 3);
}

#[test]
fn test_fold_order_changes_neither_membership_nor_risk() {
    let inputs = [
        (MovementKind::Walking, movement_result(&["calves", "core"], FallRisk::Medium)),
        (MovementKind::Squatting, movement_result(&["quadriceps", "calves"], FallRisk::Low)),
        (MovementKind::Balance, movement_result(&["core", "gluteus medius"], FallRisk::High)),
    ];
    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
    let expected: BTreeSet<&str> = ["calves", "core", "quadriceps", "gluteus medius"].into();

    for order in orders {
        let aggregate = order.iter().fold(AssessmentAggregate::default(), |acc, &i| {
            let (kind, result) = &inputs[i];
            fold_movement_result(&acc, result, *kind)
        });
        let members: BTreeSet<&str> = aggregate.weak_muscles.iter().map(String::as_str).collect();

        assert_eq!(members.len(), aggregate.weak_muscles.len(), "duplicates for {order:?}");
        assert_eq!(members, expected, "membership for {order:?}");
        assert_eq!(aggregate.fall_risk, FallRisk::High, "fall risk for {order:?}");
    }

    let low_only = [MovementKind::Walking, MovementKind::Balance]
        .into_iter()
        .fold(AssessmentAggregate::default(), |acc, kind| {
            fold_movement_result(&acc, &movement_result(&[], FallRisk::Low), kind)
        });
    assert_eq!(low_only.fall_risk, FallRisk::Low);
}

#[test]
fn test_latest_metrics_win_per_movement() {
    let mut first = movement_result(&[], FallRisk::Low);
    first.metrics.insert("step_count".to_owned(), 10.0);
    let mut second = movement_result(&[], FallRisk::Low);
    second.metrics.insert("step_count".to_owned(), 14.0);

    let aggregate = fold_movement_result(&AssessmentAggregate::default(), &first, MovementKind::Walking);
    let aggregate = fold_movement_result(&aggregate, &second, MovementKind::Walking);
    assert_eq!(aggregate.metrics[&MovementKind::Walking]["step_count"], 14.0);
}

#[test]
fn test_zero_contribution_on_empty_aggregate_adds_only_metric_slot() {
    let aggregate = fold_movement_result(
        &AssessmentAggregate::default(),
        &zero_contribution(),
        MovementKind::Balance,
    );
    assert!(aggregate.weak_muscles.is_empty());
    assert_eq!(aggregate.fall_risk, FallRisk::Low);
    assert!(aggregate.metrics[&MovementKind::Balance].is_empty());
}

#[test]
fn test_pain_areas_add_weakness_labels_once() {
    let aggregate = fold_movement_result(
        &AssessmentAggregate::default(),
        &movement_result(&["core"], FallRisk::Low),
        MovementKind::Balance,
    );
    let areas = vec!["Lower back".to_owned()];
    let once = record_pain_areas(&aggregate, &areas);
    let twice = record_pain_areas(&once, &areas);

    assert_eq!(once, twice);
    assert_eq!(once.weak_muscles.len(), 2);
    assert_eq!(once.weak_muscles[0], "core");
    assert!(once.weak_muscles[1].contains("Lower back"));
}

#[test]
fn test_derived_weakness_leaves_pain_areas_untouched() {
    let derived = derive_weakness_from_pain(&AssessmentAggregate::default(), &["Hip".to_owned()]);
    assert!(derived.pain_areas.is_empty());
    assert_eq!(derived.weak_muscles.len(), 1);
}

// ============================================================================
// Plan adjustment
// ============================================================================

#[test]
fn test_every_easy_rating_regresses() {
    let feedback: Vec<_> = (1..=5)
        .map(|n| rating(&format!("Exercise {n}"), false, Difficulty::Easy))
        .collect();
    let adjustment = compute_plan_adjustment(&feedback);
    assert_eq!(adjustment.regress.len(), 5);
    assert!(adjustment.hold_same.is_empty());
    assert!(adjustment.progress.is_empty());
}

#[test]
fn test_pain_overrides_difficulty() {
    for difficulty in [Difficulty::Easy, Difficulty::JustRight, Difficulty::Hard] {
        assert_eq!(
            classify_feedback(&rating("Lunges", true, difficulty)),
            AdjustmentBucket::Regress
        );
    }
}

#[test]
fn test_mixed_session_buckets_and_hints() {
    let adjustment = compute_plan_adjustment(&[
        rating("Bridges", false, Difficulty::JustRight),
        rating("Step-ups", false, Difficulty::Hard),
        rating("Lunges", true, Difficulty::Hard),
    ]);
    assert_eq!(adjustment.hold_same, vec!["Bridges"]);
    assert_eq!(adjustment.progress, vec!["Step-ups"]);
    assert_eq!(adjustment.regress, vec!["Lunges"]);
    assert_eq!(adjustment.len(), 3);

    let hints = adjustment.to_prompt_hints();
    for exercise in ["Bridges", "Step-ups", "Lunges"] {
        assert!(hints.contains(exercise));
    }
}

#[test]
fn test_no_feedback_means_no_adjustment() {
    assert!(compute_plan_adjustment(&[]).is_empty());
}
