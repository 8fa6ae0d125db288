// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Safety thresholds, checklists, and user-facing wizard messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

//! Constants module
//!
//! Constants are grouped by domain: safety thresholds, the intake and
//! safety checklists, and the fixed messages the wizard shows to users.

/// Red-flag and pain-area checklists shown during the safety step
pub mod checklists;

/// Seated-exercise recommendation thresholds
pub mod safety {
    /// Ages strictly above this recommend seated-friendly exercises
    pub const SEATED_AGE_THRESHOLD: u8 = 50;
    /// Baseline pain strictly above this recommend seated-friendly exercises
    pub const SEATED_PAIN_THRESHOLD: u8 = 4;
}

/// Pain scale bounds (Wong-Baker 0-10)
pub mod pain {
    /// Lowest pain rating
    pub const MIN_PAIN: u8 = 0;
    /// Highest pain rating
    pub const MAX_PAIN: u8 = 10;
}

/// Exercise plan limits
pub mod plan {
    /// Maximum number of exercises kept from a suggestion
    pub const MAX_EXERCISES: usize = 5;
}

/// Defaults for wizard timing and input limits
pub mod defaults {
    /// Days after the last session before a reassessment is offered
    pub const REASSESSMENT_INTERVAL_DAYS: i64 = 7;
    /// Upper bound on any single external service call
    pub const SERVICE_TIMEOUT_SECS: u64 = 120;
    /// Largest video accepted for inline upload (14 MiB). Base64 grows it by
    /// a third, which keeps the request under the 20 MB inline cap.
    pub const MAX_VIDEO_BYTES: usize = 14 * 1024 * 1024;
    /// Canonical minimum intake age
    pub const MIN_AGE: u8 = 18;
    /// Canonical maximum intake age
    pub const MAX_AGE: u8 = 100;
    /// Hard upper bound any configured age range must respect
    pub const ABSOLUTE_MAX_AGE: u8 = 120;
}

/// Fixed user-facing messages
pub mod messages {
    /// Flag appended when the user tries to leave movement screens without any assessment
    pub const NO_MOVEMENTS_ASSESSED: &str = "No movements assessed";
    /// Shown after a failed movement analysis
    pub const ANALYSIS_RETRY: &str = "Analysis failed. Try a shorter, clearer video.";
    /// Shown when a seated-friendly plan is recommended
    pub const SEATED_RECOMMENDATION: &str =
        "We'll recommend gentle, seated-friendly exercises for safety. You can override if comfortable.";
    /// Shown at intake when a reassessment is due
    pub const REASSESSMENT_DUE: &str =
        "It's time for your weekly reassessment to track progress!";
    /// Closing disclaimer
    pub const DISCLAIMER: &str =
        "Always consult a healthcare professional. This app is for educational use.";
}
