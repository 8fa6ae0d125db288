// ABOUTME: Wizard runtime limits: service timeout, reassessment interval, video size cap
// ABOUTME: Loaded from PT_COACH_* environment variables with validated defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::time::Duration;

use chrono::Duration as ChronoDuration;
use serde::{Deserialize, Serialize};

use super::env::parse_or;
use super::ConfigError;
use crate::constants::defaults::{MAX_VIDEO_BYTES, REASSESSMENT_INTERVAL_DAYS, SERVICE_TIMEOUT_SECS};

const BYTES_PER_MIB: usize = 1024 * 1024;

/// Limits applied by the session wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Upper bound on each analysis or suggestion call
    pub service_timeout_secs: u64,
    /// Days after the last session before reassessment is offered
    pub reassessment_interval_days: i64,
    /// Largest video accepted, in bytes
    pub max_video_bytes: usize,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            service_timeout_secs: SERVICE_TIMEOUT_SECS,
            reassessment_interval_days: REASSESSMENT_INTERVAL_DAYS,
            max_video_bytes: MAX_VIDEO_BYTES,
        }
    }
}

impl WizardConfig {
    /// Environment variable for the service timeout
    pub const TIMEOUT_ENV_VAR: &'static str = "PT_COACH_SERVICE_TIMEOUT_SECS";
    /// Environment variable for the reassessment interval
    pub const REASSESSMENT_ENV_VAR: &'static str = "PT_COACH_REASSESSMENT_DAYS";
    /// Environment variable for the video size cap in MiB
    pub const MAX_VIDEO_MB_ENV_VAR: &'static str = "PT_COACH_MAX_VIDEO_MB";

    /// Load from environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let max_video_mb: usize =
            parse_or(Self::MAX_VIDEO_MB_ENV_VAR, defaults.max_video_bytes / BYTES_PER_MIB)?;
        let config = Self {
            service_timeout_secs: parse_or(Self::TIMEOUT_ENV_VAR, defaults.service_timeout_secs)?,
            reassessment_interval_days: parse_or(
                Self::REASSESSMENT_ENV_VAR,
                defaults.reassessment_interval_days,
            )?,
            max_video_bytes: max_video_mb.saturating_mul(BYTES_PER_MIB),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check all limits are positive
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` naming the first non-positive limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_timeout_secs == 0 {
            return Err(ConfigError::InvalidRange(
                "service timeout must be at least 1 second".to_owned(),
            ));
        }
        if self.reassessment_interval_days <= 0 {
            return Err(ConfigError::InvalidRange(
                "reassessment interval must be at least 1 day".to_owned(),
            ));
        }
        if self.max_video_bytes == 0 {
            return Err(ConfigError::InvalidRange(
                "video size limit must be at least 1 MiB".to_owned(),
            ));
        }
        Ok(())
    }

    /// Service timeout as a `Duration`
    #[must_use]
    pub const fn service_timeout(&self) -> Duration {
        Duration::from_secs(self.service_timeout_secs)
    }

    /// Reassessment interval as a calendar duration
    #[must_use]
    pub fn reassessment_interval(&self) -> ChronoDuration {
        ChronoDuration::days(self.reassessment_interval_days)
    }
}
