// ABOUTME: Safety checklist answers: triggered red-flag questions and reported pain areas
// ABOUTME: Resolves checklist indices to question text before they become pain flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use serde::{Deserialize, Serialize};

use crate::constants::checklists::{red_flag, RED_FLAG_QUESTIONS};
use crate::errors::{AppError, AppResult};

/// Answers from the safety step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyAnswers {
    /// Zero-based indices of red-flag questions answered "yes"
    pub red_flags: Vec<usize>,
    /// Body areas where the user has pain
    pub pain_areas: Vec<String>,
}

impl SafetyAnswers {
    /// No flags, no pain areas
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Add a triggered red-flag question
    #[must_use]
    pub fn with_red_flag(mut self, index: usize) -> Self {
        self.red_flags.push(index);
        self
    }

    /// Add a pain area
    #[must_use]
    pub fn with_pain_area(mut self, area: impl Into<String>) -> Self {
        self.pain_areas.push(area.into());
        self
    }

    /// Question text for each triggered flag
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an index outside the checklist.
    pub fn red_flag_texts(&self) -> AppResult<Vec<&'static str>> {
        self.red_flags
            .iter()
            .map(|&index| {
                red_flag(index).ok_or_else(|| {
                    AppError::invalid_input(format!(
                        "Red-flag question {} does not exist (checklist has {})",
                        index + 1,
                        RED_FLAG_QUESTIONS.len()
                    ))
                })
            })
            .collect()
    }
}
