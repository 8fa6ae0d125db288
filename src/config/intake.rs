// ABOUTME: Intake form configuration: required fields, accepted age range, gender options
// ABOUTME: One configurable intake replaces per-variant copies of the intake screen
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::env::{flag_or, non_empty, parse_or};
use super::ConfigError;
use crate::constants::defaults::{ABSOLUTE_MAX_AGE, MAX_AGE, MIN_AGE};
use crate::models::Gender;

/// Which intake fields are required and what values they accept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// First name must be non-empty
    pub require_name: bool,
    /// Youngest accepted age
    pub min_age: u8,
    /// Oldest accepted age
    pub max_age: u8,
    /// Gender options offered, in display order
    pub gender_options: Vec<Gender>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            require_name: false,
            min_age: MIN_AGE,
            max_age: MAX_AGE,
            gender_options: vec![Gender::Male, Gender::Female, Gender::PreferNotToSay],
        }
    }
}

impl IntakeConfig {
    /// Environment variable selecting a preset (`default` or `strict`)
    pub const PROFILE_ENV_VAR: &'static str = "PT_COACH_INTAKE_PROFILE";
    /// Environment variable overriding `require_name`
    pub const REQUIRE_NAME_ENV_VAR: &'static str = "PT_COACH_REQUIRE_NAME";
    /// Environment variable overriding `min_age`
    pub const MIN_AGE_ENV_VAR: &'static str = "PT_COACH_MIN_AGE";
    /// Environment variable overriding `max_age`
    pub const MAX_AGE_ENV_VAR: &'static str = "PT_COACH_MAX_AGE";

    /// Strict preset: name required, same age range and options as default
    #[must_use]
    pub fn strict() -> Self {
        Self {
            require_name: true,
            ..Self::default()
        }
    }

    /// Accepted ages as a range
    #[must_use]
    pub const fn age_range(&self) -> RangeInclusive<u8> {
        self.min_age..=self.max_age
    }

    /// Whether `gender` is one of the offered options
    #[must_use]
    pub fn offers_gender(&self, gender: Gender) -> bool {
        self.gender_options.contains(&gender)
    }

    /// Load from environment, starting from the selected preset
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or the result fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match non_empty(Self::PROFILE_ENV_VAR).as_deref() {
            None | Some("default") => Self::default(),
            Some("strict") => Self::strict(),
            Some(other) => {
                return Err(ConfigError::Parse {
                    name: Self::PROFILE_ENV_VAR,
                    value: other.to_owned(),
                })
            }
        };

        let config = Self {
            require_name: flag_or(Self::REQUIRE_NAME_ENV_VAR, base.require_name)?,
            min_age: parse_or(Self::MIN_AGE_ENV_VAR, base.min_age)?,
            max_age: parse_or(Self::MAX_AGE_ENV_VAR, base.max_age)?,
            gender_options: base.gender_options,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` for an inverted or oversized age range, and
    /// `MissingField` when no gender option is offered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_age > self.max_age {
            return Err(ConfigError::InvalidRange(format!(
                "minimum age {} exceeds maximum age {}",
                self.min_age, self.max_age
            )));
        }
        if self.max_age > ABSOLUTE_MAX_AGE {
            return Err(ConfigError::InvalidRange(format!(
                "maximum age {} exceeds {ABSOLUTE_MAX_AGE}",
                self.max_age
            )));
        }
        if self.gender_options.is_empty() {
            return Err(ConfigError::MissingField("gender_options"));
        }
        Ok(())
    }
}
