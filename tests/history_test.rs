// ABOUTME: Tests for the append-only session history and its progress summary
// ABOUTME: Builds records directly to check ordering, pain trend, and JSON export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, Utc};
use common::{five_exercise_plan, intake_form};
use pt_coach::config::IntakeConfig;
use pt_coach::history::SessionHistory;
use pt_coach::models::{
    AssessmentAggregate, ExercisePlan, FallRisk, PainLevel, PlanAdjustment, SessionRecord,
};
use uuid::Uuid;

fn record(days_ago: i64, pain: u8, fall_risk: FallRisk, next_plan: ExercisePlan) -> SessionRecord {
    SessionRecord {
        id: Uuid::new_v4(),
        timestamp: Utc::now() - Duration::days(days_ago),
        profile: intake_form(55, 5).validate(&IntakeConfig::default()).unwrap(),
        assessment: AssessmentAggregate {
            fall_risk,
            ..AssessmentAggregate::default()
        },
        post_session_pain: PainLevel::new(pain).unwrap(),
        pain_response: "ok".to_owned(),
        plan: five_exercise_plan(),
        feedback: Vec::new(),
        adjustment: PlanAdjustment::default(),
        next_plan,
    }
}

#[test]
fn test_empty_history_has_no_summary() {
    let history = SessionHistory::new();
    assert!(history.is_empty());
    assert!(history.last().is_none());
    assert!(history.progress_summary().is_none());
}

#[test]
fn test_summary_tracks_pain_trend_and_highest_risk() {
    let mut history = SessionHistory::new();
    history.append(record(14, 6, FallRisk::Medium, ExercisePlan::default()));
    history.append(record(7, 4, FallRisk::High, ExercisePlan::default()));
    history.append(record(0, 3, FallRisk::Low, five_exercise_plan()));

    let summary = history.progress_summary().unwrap();
    assert_eq!(summary.sessions, 3);
    assert_eq!(summary.first_pain, 6);
    assert_eq!(summary.latest_pain, 3);
    assert_eq!(summary.pain_change, -3);
    assert_eq!(summary.highest_fall_risk, FallRisk::High);
    assert_eq!(summary.latest_next_plan, five_exercise_plan());
}

#[test]
fn test_records_stay_in_append_order() {
    let mut history = SessionHistory::new();
    let first = record(3, 2, FallRisk::Low, ExercisePlan::default());
    let second = record(1, 5, FallRisk::Low, ExercisePlan::default());
    history.append(first.clone());
    history.append(second.clone());

    assert_eq!(history.records(), [first, second.clone()]);
    assert_eq!(history.last(), Some(&second));
    assert_eq!(history.progress_summary().unwrap().pain_change, 3);
}

#[test]
fn test_json_export_round_trips() {
    let mut history = SessionHistory::new();
    history.append(record(2, 4, FallRisk::Medium, five_exercise_plan()));

    let json = history.to_json().unwrap();
    assert!(json.contains("\"post_session_pain\": 4"));
    let restored: SessionHistory = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, history);
}
