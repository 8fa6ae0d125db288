// ABOUTME: Output formatting helpers for pt-coach
// ABOUTME: Step banners, movement findings, exercise plans, and session summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use pt_coach::constants::messages::{DISCLAIMER, SEATED_RECOMMENDATION};
use pt_coach::history::ProgressSummary;
use pt_coach::models::{MovementResult, SessionRecord, UserProfile};
use pt_coach::wizard::{MovementOutcome, PlanOutcome, WizardSession, WizardState};

const RULE_WIDTH: usize = 60;

/// Step header
pub fn display_step(state: WizardState) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{state}");
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Greeting after intake or when a reassessment reuses the profile
pub fn display_profile(profile: &UserProfile) {
    println!("\nHi {}!", profile.display_name());
    println!(
        "   Age {} | Baseline pain {} ({}) | {}",
        profile.age,
        profile.baseline_pain.value(),
        profile.baseline_pain.wong_baker_label(),
        profile.chief_complaint_type
    );
    if profile.seated_recommended {
        println!("   {SEATED_RECOMMENDATION}");
    }
}

fn display_findings(result: &MovementResult) {
    println!("   Fall risk: {}", result.fall_risk);
    if result.weak_muscles.is_empty() {
        println!("   No weak muscles noted");
    } else {
        println!("   Weak muscles: {}", result.weak_muscles.join(", "));
    }
    for (name, value) in &result.metrics {
        println!("   {name}: {value}");
    }
}

/// Outcome of one movement upload
pub fn display_movement_outcome(outcome: &MovementOutcome) {
    match outcome {
        MovementOutcome::Analyzed {
            kind,
            result,
            reused,
        } => {
            if *reused {
                println!("\nThis {kind} video was already analyzed; using the earlier result.");
            } else {
                println!("\n{kind} analyzed.");
            }
            display_findings(result);
        }
        MovementOutcome::Failed { kind, message, .. } => {
            println!("\n{kind}: {message}");
        }
    }
}

/// Running assessment while on the movement screen
pub fn display_assessment(session: &WizardSession) {
    let performed: Vec<String> = session
        .performed_movements()
        .iter()
        .map(ToString::to_string)
        .collect();
    if performed.is_empty() {
        println!("No movements assessed yet.");
        return;
    }
    let aggregate = session.aggregate();
    println!("Assessed: {}", performed.join(", "));
    println!("Overall fall risk: {}", aggregate.fall_risk);
    if !aggregate.weak_muscles.is_empty() {
        println!("Weak areas: {}", aggregate.weak_muscles.join(", "));
    }
}

/// Result of entering the exercise step or regenerating
pub fn display_plan_outcome(outcome: &PlanOutcome, session: &WizardSession) {
    match outcome {
        PlanOutcome::Ready { .. } => display_plan(session),
        PlanOutcome::Empty { message } => println!("\n{message}"),
    }
}

/// Numbered exercise list, marking rated entries
pub fn display_plan(session: &WizardSession) {
    println!("\nYour exercise plan:");
    for (index, exercise) in session.plan().iter().enumerate() {
        let mark = if index < session.exercise_index() { "x" } else { " " };
        println!("  [{mark}] {}. {exercise}", index + 1);
    }
}

/// Recorded session with the adjustments and next plan
pub fn display_record(record: &SessionRecord) {
    println!("\nSession saved.");
    println!(
        "   Pain after session: {} ({})",
        record.post_session_pain.value(),
        record.post_session_pain.wong_baker_label()
    );
    if !record.adjustment.is_empty() {
        for (label, exercises) in [
            ("Make easier", &record.adjustment.regress),
            ("Keep the same", &record.adjustment.hold_same),
            ("Make harder", &record.adjustment.progress),
        ] {
            if !exercises.is_empty() {
                println!("   {label}: {}", exercises.join("; "));
            }
        }
    }
    if record.next_plan.is_empty() {
        println!("   Next plan could not be generated; a new one will be suggested next time.");
    } else {
        println!("   Next plan:");
        for (index, exercise) in record.next_plan.iter().enumerate() {
            println!("     {}. {exercise}", index + 1);
        }
    }
}

/// Progress across all recorded sessions
pub fn display_progress(summary: &ProgressSummary) {
    println!("\nProgress over {} session(s):", summary.sessions);
    let trend = match summary.pain_change {
        change if change < 0 => format!("down {}", change.unsigned_abs()),
        0 => "unchanged".to_owned(),
        change => format!("up {change}"),
    };
    println!(
        "   Pain after sessions: {} -> {} ({trend})",
        summary.first_pain, summary.latest_pain
    );
    println!("   Highest fall risk seen: {}", summary.highest_fall_risk);
}

pub fn display_disclaimer() {
    println!("\n{DISCLAIMER}");
}
