// ABOUTME: Core data models for the PT Coach assessment wizard
// ABOUTME: Re-exports profile, movement, exercise, and session record types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

//! # Data Models
//!
//! - `UserProfile`: demographics and pain captured once at intake
//! - `MovementResult` / `AssessmentAggregate`: per-movement analyses and their running fold
//! - `ExercisePlan` / `ExerciseFeedback` / `PlanAdjustment`: the exercise session
//! - `SessionRecord`: immutable snapshot appended to history at session end
//!
//! All models serialize to JSON so history can be displayed or exported.

mod exercise;
mod movement;
mod profile;
mod session;

pub use exercise::{Difficulty, ExerciseFeedback, ExercisePlan, PlanAdjustment};
pub use movement::{AssessmentAggregate, FallRisk, MovementKind, MovementResult};
pub use profile::{ComplaintType, Gender, PainLevel, UserProfile};
pub use session::SessionRecord;
