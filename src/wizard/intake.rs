// ABOUTME: Intake form input and its validation against the configured intake rules
// ABOUTME: Produces the immutable UserProfile with the derived seated recommendation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use serde::{Deserialize, Serialize};

use crate::config::IntakeConfig;
use crate::constants::pain::{MAX_PAIN, MIN_PAIN};
use crate::errors::{AppError, AppResult};
use crate::models::{ComplaintType, Gender, PainLevel, UserProfile};

/// Raw answers from the intake screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeForm {
    /// First name, possibly blank
    pub first_name: Option<String>,
    /// Selected gender option
    pub gender: Gender,
    /// Age in years
    pub age: u8,
    /// Current pain, 0-10
    pub baseline_pain: u8,
    /// Main reason for the visit
    pub chief_complaint_type: ComplaintType,
    /// Free-text complaint
    pub complaint: String,
    /// User prefers standing exercises
    pub override_seated: bool,
}

impl IntakeForm {
    /// Validate against `config` and build the profile
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for a blank required name,
    /// `ValueOutOfRange` for age or pain outside bounds, and `InvalidInput`
    /// for a gender option that is not offered.
    pub fn validate(&self, config: &IntakeConfig) -> AppResult<UserProfile> {
        let first_name = self
            .first_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned);
        if config.require_name && first_name.is_none() {
            return Err(AppError::missing_field("first name"));
        }

        if !config.offers_gender(self.gender) {
            return Err(AppError::invalid_input(format!(
                "'{}' is not an available gender option",
                self.gender
            )));
        }

        if !config.age_range().contains(&self.age) {
            return Err(AppError::out_of_range("Age", config.min_age, config.max_age));
        }

        let baseline_pain = PainLevel::new(self.baseline_pain)
            .map_err(|_| AppError::out_of_range("Pain level", MIN_PAIN, MAX_PAIN))?;

        Ok(UserProfile {
            first_name,
            gender: self.gender,
            age: self.age,
            baseline_pain,
            chief_complaint_type: self.chief_complaint_type,
            complaint: self.complaint.trim().to_owned(),
            seated_recommended: UserProfile::compute_seated_recommended(
                self.age,
                baseline_pain,
                self.override_seated,
            ),
            override_seated: self.override_seated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn form() -> IntakeForm {
        IntakeForm {
            first_name: Some("  ".to_owned()),
            gender: Gender::PreferNotToSay,
            age: 60,
            baseline_pain: 3,
            chief_complaint_type: ComplaintType::Balance,
            complaint: " unsteady on stairs ".to_owned(),
            override_seated: false,
        }
    }

    #[test]
    fn test_blank_name_is_none_when_optional() {
        let profile = form().validate(&IntakeConfig::default()).unwrap();
        assert_eq!(profile.first_name, None);
        assert_eq!(profile.complaint, "unsteady on stairs");
        assert!(profile.seated_recommended);
    }

    #[test]
    fn test_strict_requires_name() {
        let err = form().validate(&IntakeConfig::strict()).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
    }

    #[test]
    fn test_out_of_range_values() {
        let mut young = form();
        young.age = 17;
        assert_eq!(young.validate(&IntakeConfig::default()).unwrap_err().code, ErrorCode::ValueOutOfRange);

        let mut pain = form();
        pain.baseline_pain = 11;
        assert_eq!(pain.validate(&IntakeConfig::default()).unwrap_err().code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_gender_must_be_offered() {
        let config = IntakeConfig {
            gender_options: vec![Gender::Male, Gender::Female],
            ..IntakeConfig::default()
        };
        assert_eq!(form().validate(&config).unwrap_err().code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_override_clears_recommendation() {
        let mut standing = form();
        standing.override_seated = true;
        let profile = standing.validate(&IntakeConfig::default()).unwrap();
        assert!(!profile.seated_recommended);
        assert!(profile.override_seated);
    }
}
