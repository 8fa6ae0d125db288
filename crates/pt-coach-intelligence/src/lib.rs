// ABOUTME: Assessment aggregation engine for the PT Coach wizard
// ABOUTME: Pure folds over movement analyses, pain reports, and exercise feedback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

#![deny(unsafe_code)]

//! # PT Coach Intelligence
//!
//! Side-effect-free rules that turn per-movement analyses and exercise
//! ratings into the running assessment and the next plan's adjustment hints.
//! Every function takes its inputs by reference and returns a new value, so
//! callers can fold results repeatedly without worrying about aliasing.

/// Folding movement results and pain reports into the running assessment
pub mod aggregator;

/// Classifying exercise feedback into regress / hold / progress buckets
pub mod plan_adjustment;

pub use aggregator::{
    derive_weakness_from_pain, fold_movement_result, pain_weakness_label, record_pain_areas,
    zero_contribution,
};
pub use plan_adjustment::{classify_feedback, compute_plan_adjustment, AdjustmentBucket};

pub use pt_coach_core::{errors, models};
