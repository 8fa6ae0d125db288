// ABOUTME: Intake profile types: gender, chief complaint, pain level, and user profile
// ABOUTME: Includes Wong-Baker pain labels and the seated-exercise recommendation rule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::pain::{MAX_PAIN, MIN_PAIN};
use crate::constants::safety::{SEATED_AGE_THRESHOLD, SEATED_PAIN_THRESHOLD};
use crate::errors::AppError;

/// Gender options offered at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// User chose not to disclose
    PreferNotToSay,
}

impl Gender {
    /// Display label used in intake prompts
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::PreferNotToSay => "Prefer not to say",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            "prefer not to say" | "prefer_not_to_say" | "none" | "-" => Ok(Self::PreferNotToSay),
            other => Err(AppError::invalid_input(format!(
                "Unknown gender option '{other}'"
            ))),
        }
    }
}

/// Main reason the user is seeking help
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintType {
    /// Pain somewhere in the body
    Pain,
    /// Balance issues or unsteadiness
    Balance,
    /// Anything else (described in free text)
    Other,
}

impl ComplaintType {
    /// Display label used in intake prompts
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pain => "Pain",
            Self::Balance => "Balance issues",
            Self::Other => "Other",
        }
    }
}

impl Display for ComplaintType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComplaintType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pain" => Ok(Self::Pain),
            "balance" | "balance issues" => Ok(Self::Balance),
            "other" => Ok(Self::Other),
            other => Err(AppError::invalid_input(format!(
                "Unknown complaint type '{other}'"
            ))),
        }
    }
}

/// Pain rating on the 0-10 Wong-Baker scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PainLevel(u8);

impl PainLevel {
    /// Create a pain level, rejecting values above 10
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when `value` is greater than 10.
    pub fn new(value: u8) -> Result<Self, AppError> {
        if value > MAX_PAIN {
            return Err(AppError::out_of_range("Pain level", MIN_PAIN, MAX_PAIN));
        }
        Ok(Self(value))
    }

    /// Numeric value 0-10
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Wong-Baker face description; odd values use the next lower face
    #[must_use]
    pub const fn wong_baker_label(self) -> &'static str {
        match self.0 {
            0 | 1 => "No hurt",
            2 | 3 => "Hurts little bit",
            4 | 5 => "Hurts little more",
            6 | 7 => "Hurts even more",
            8 | 9 => "Hurts whole lot",
            _ => "Hurts worst",
        }
    }
}

impl TryFrom<u8> for PainLevel {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PainLevel> for u8 {
    fn from(level: PainLevel) -> Self {
        level.0
    }
}

impl Display for PainLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.wong_baker_label())
    }
}

/// Profile captured once at intake; read-only afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// First name, when given
    pub first_name: Option<String>,
    /// Gender option chosen
    pub gender: Gender,
    /// Age in years
    pub age: u8,
    /// Pain before the session
    pub baseline_pain: PainLevel,
    /// Main reason for the visit
    pub chief_complaint_type: ComplaintType,
    /// Free-text description of the complaint
    pub complaint: String,
    /// Derived: chair-based variants are recommended
    pub seated_recommended: bool,
    /// User asked for standing exercises despite the recommendation
    pub override_seated: bool,
}

impl UserProfile {
    /// Whether age or pain alone calls for seated-friendly exercises
    #[must_use]
    pub const fn seated_indicated(age: u8, baseline_pain: PainLevel) -> bool {
        age > SEATED_AGE_THRESHOLD || baseline_pain.value() > SEATED_PAIN_THRESHOLD
    }

    /// Seated recommendation after applying the user's override
    #[must_use]
    pub const fn compute_seated_recommended(
        age: u8,
        baseline_pain: PainLevel,
        override_seated: bool,
    ) -> bool {
        Self::seated_indicated(age, baseline_pain) && !override_seated
    }

    /// Name to greet the user with
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("there")
    }
}
