// ABOUTME: Logging configuration and structured session events for the PT Coach wizard
// ABOUTME: Configures level, format, and filters; all output goes to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

//! Structured logging
//!
//! Logs are written to stderr so the interactive wizard owns stdout.
//! Names entered at intake are never logged.

use std::env;
use std::io;
use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::models::{FallRisk, MovementKind};

/// Service name reported at startup
pub const SERVICE_NAME: &str = "pt-coach";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` lines
    Json,
    /// Multi-line human readable
    Pretty,
    /// Single line, no targets
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Compact,
            include_location: false,
            include_thread: false,
            service_name: SERVICE_NAME.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let level = env::var("RUST_LOG").unwrap_or(defaults.level);

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") => LogFormat::Pretty,
            _ => LogFormat::Compact,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            service_name: defaults.service_name,
            service_version: defaults.service_version,
            environment,
        }
    }

    /// Raise the level for `-v` flags: 1 → info, 2 → debug, 3+ → trace
    #[must_use]
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        let level = match verbose {
            0 => return self,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        level.clone_into(&mut self.level);
        self
    }

    /// Filter for this configuration with dependency noise reduced
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(&self.level)
            .add_directive(
                "hyper=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
            .add_directive(
                "hyper_util=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
            .add_directive(
                "reqwest=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
            .add_directive(
                "rustls=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .json();
                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .pretty()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr);
                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_file(false)
                    .with_line_number(false)
                    .with_target(false)
                    .with_writer(io::stderr);
                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        let summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "location": self.include_location,
                "thread": self.include_thread
            }
        });
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            "PT Coach starting: {summary}"
        );
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Structured events emitted over a wizard session
pub struct SessionLogger;

impl SessionLogger {
    /// Wizard moved between steps
    pub fn log_transition(session_id: &str, from: &str, to: &str) {
        info!(
            session.id = %session_id,
            wizard.from = %from,
            wizard.to = %to,
            "Wizard transition"
        );
    }

    /// A movement analysis finished
    pub fn log_movement_analysis(
        session_id: &str,
        kind: MovementKind,
        success: bool,
        fall_risk: Option<FallRisk>,
    ) {
        if success {
            info!(
                session.id = %session_id,
                movement.kind = %kind,
                movement.fall_risk = fall_risk.map_or("n/a", |r| r.as_str()),
                "Movement analyzed"
            );
        } else {
            warn!(
                session.id = %session_id,
                movement.kind = %kind,
                "Movement analysis failed"
            );
        }
    }

    /// Safety flags raised at the checklist or by a blocked transition
    pub fn log_safety_flags(session_id: &str, flag_count: usize, overridden: bool) {
        warn!(
            session.id = %session_id,
            safety.flags = flag_count,
            safety.overridden = overridden,
            "Safety flags raised"
        );
    }

    /// An exercise plan was generated
    pub fn log_plan_generated(session_id: &str, exercises: usize, regenerated: bool) {
        info!(
            session.id = %session_id,
            plan.exercises = exercises,
            plan.regenerated = regenerated,
            "Exercise plan generated"
        );
    }

    /// A session record was appended to history
    pub fn log_session_recorded(session_id: &str, record_id: &str, history_len: usize) {
        info!(
            session.id = %session_id,
            record.id = %record_id,
            history.len = history_len,
            "Session recorded"
        );
    }

    /// An external service call completed
    pub fn log_service_call(operation: &str, provider: &str, elapsed: Duration, success: bool) {
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        debug!(
            service.operation = %operation,
            service.provider = %provider,
            service.duration_ms = duration_ms,
            service.success = success,
            "Service call"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_overrides_level() {
        let config = LoggingConfig::default().with_verbosity(2);
        assert_eq!(config.level, "debug");
        let untouched = LoggingConfig::default().with_verbosity(0);
        assert_eq!(untouched.level, "warn");
    }
}
