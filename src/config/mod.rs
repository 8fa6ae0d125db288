// ABOUTME: Configuration module aggregating intake, wizard, and LLM settings
// ABOUTME: Every value has a default and can be overridden from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

//! Environment-driven configuration
//!
//! `CoachConfig::from_env()` reads every `PT_COACH_*` variable once at
//! startup. Unset variables fall back to defaults; malformed values are
//! reported as `ConfigError` and never silently replaced.

/// Typed environment variable readers
pub mod env;
/// Configuration error type
pub mod error;
/// Intake form requirements
pub mod intake;
/// LLM provider selection
pub mod llm;
/// Wizard limits
pub mod wizard;

pub use error::ConfigError;
pub use intake::IntakeConfig;
pub use llm::LlmProviderType;
pub use wizard::WizardConfig;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Intake form requirements
    pub intake: IntakeConfig,
    /// Wizard limits
    pub wizard: WizardConfig,
    /// Selected LLM backend
    pub llm_provider: LlmProviderType,
}

impl CoachConfig {
    /// Load all sections from the environment
    ///
    /// # Errors
    ///
    /// Returns the first section's error when any variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            intake: IntakeConfig::from_env()?,
            wizard: WizardConfig::from_env()?,
            llm_provider: LlmProviderType::from_env(),
        };
        debug!(
            require_name = config.intake.require_name,
            min_age = config.intake.min_age,
            max_age = config.intake.max_age,
            timeout_secs = config.wizard.service_timeout_secs,
            reassessment_days = config.wizard.reassessment_interval_days,
            llm_provider = %config.llm_provider,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first section's validation error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.intake.validate()?;
        self.wizard.validate()
    }
}
