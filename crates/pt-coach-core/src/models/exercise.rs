// ABOUTME: Exercise session types: the plan, per-exercise feedback, and plan adjustments
// ABOUTME: Parses newline-delimited suggestions into a plan of at most five exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::plan::MAX_EXERCISES;
use crate::errors::AppError;

/// How hard an exercise felt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Too easy
    Easy,
    /// About right
    JustRight,
    /// Too hard
    Hard,
}

impl Difficulty {
    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::JustRight => "Just right",
            Self::Hard => "Hard",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" => Ok(Self::Easy),
            "just right" | "just_right" | "justright" | "ok" | "j" => Ok(Self::JustRight),
            "hard" | "h" => Ok(Self::Hard),
            other => Err(AppError::invalid_input(format!(
                "Unknown difficulty '{other}' (expected easy, just right, or hard)"
            ))),
        }
    }
}

/// Rating of one completed exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseFeedback {
    /// Exercise description as it appeared in the plan
    pub exercise: String,
    /// Pain went up while doing the exercise
    pub pain_increased: bool,
    /// Perceived difficulty
    pub difficulty: Difficulty,
}

/// Ordered list of at most five exercise descriptions
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExercisePlan {
    exercises: Vec<String>,
}

impl ExercisePlan {
    /// Build a plan from descriptions, dropping blanks and keeping the first five
    pub fn from_exercises<I>(exercises: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let exercises = exercises
            .into_iter()
            .map(|e| e.trim().to_owned())
            .filter(|e| !e.is_empty())
            .take(MAX_EXERCISES)
            .collect();
        Self { exercises }
    }

    /// Number of exercises
    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Whether the plan has no exercises
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Exercise at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.exercises.get(index).map(String::as_str)
    }

    /// Exercises in plan order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.exercises.iter().map(String::as_str)
    }

    /// Exercises as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.exercises
    }
}

/// Advisory classification of last session's exercises, fed to the next suggestion
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanAdjustment {
    /// Make easier next time
    pub regress: Vec<String>,
    /// Keep as is
    pub hold_same: Vec<String>,
    /// Make harder next time
    pub progress: Vec<String>,
}

impl PlanAdjustment {
    /// Whether no exercise has been classified
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regress.is_empty() && self.hold_same.is_empty() && self.progress.is_empty()
    }

    /// Total number of classified exercises
    #[must_use]
    pub fn len(&self) -> usize {
        self.regress.len() + self.hold_same.len() + self.progress.len()
    }

    /// Render the buckets as hint lines for a suggestion prompt
    #[must_use]
    pub fn to_prompt_hints(&self) -> String {
        let mut hints = String::new();
        for (label, bucket) in [
            ("Regress (make easier or substitute)", &self.regress),
            ("Keep the same", &self.hold_same),
            ("Progress (make slightly harder)", &self.progress),
        ] {
            if bucket.is_empty() {
                continue;
            }
            hints.push_str(label);
            hints.push_str(":\n");
            for exercise in bucket {
                hints.push_str("- ");
                hints.push_str(exercise);
                hints.push('\n');
            }
        }
        hints
    }
}
