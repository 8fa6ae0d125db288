// ABOUTME: Unified error handling for the PT Coach wizard and its external services
// ABOUTME: Defines ErrorCode, AppError, and recoverability rules for user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

//! # Unified Error Handling System
//!
//! Every failure the wizard can report is an [`AppError`] tagged with an
//! [`ErrorCode`]. Codes split into two families:
//!
//! - **Recoverable** conditions (validation, analysis failures, safety gate,
//!   empty plans, wrong state) keep the wizard in its current state and carry
//!   a message meant for the person using the wizard.
//! - **Fatal** conditions (missing configuration, internal faults) only occur
//!   at startup or at the edges of the system.

mod analysis;

pub use analysis::AnalysisError;

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Generic invalid input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required intake field was left empty
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// A numeric field is outside its accepted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Wizard flow (4000-4999)
    /// Operation is not valid in the wizard's current state
    #[serde(rename = "INVALID_STATE")]
    InvalidState = 4000,
    /// Movement analysis failed or returned an unparsable response
    #[serde(rename = "ANALYSIS_FAILED")]
    AnalysisFailed = 4001,
    /// Red flags were raised and not acknowledged
    #[serde(rename = "SAFETY_GATE")]
    SafetyGate = 4002,
    /// The exercise suggestion produced no usable lines
    #[serde(rename = "PLAN_GENERATION_EMPTY")]
    PlanGenerationEmpty = 4003,
    /// No movement has been successfully assessed yet
    #[serde(rename = "NO_MOVEMENTS_ASSESSED")]
    NoMovementsAssessed = 4004,
    /// Not every exercise in the plan has been rated
    #[serde(rename = "EXERCISES_INCOMPLETE")]
    ExercisesIncomplete = 4005,

    // External Services (5000-5999)
    /// An external service returned an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// An external service could not be reached or timed out
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// An external service rejected the credentials
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,
    /// An external service rate limit or quota was hit
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5003,

    // Configuration (6000-6999)
    /// Required configuration is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// Configuration is present but invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal fault
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// File or stream access failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::InvalidState => "This step is not available right now",
            Self::AnalysisFailed => "The movement analysis could not be completed",
            Self::SafetyGate => "Safety concerns must be acknowledged before continuing",
            Self::PlanGenerationEmpty => "No exercises could be generated",
            Self::NoMovementsAssessed => "At least one movement must be assessed",
            Self::ExercisesIncomplete => "Every exercise must be rated before continuing",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with external service failed",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "File access failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the wizard can stay in its current state and let the user retry
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::ConfigMissing | Self::ConfigInvalid | Self::InternalError
        )
    }
}

/// Unified error type for the application
#[derive(Debug)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Message suitable for showing to the person using the wizard
    #[must_use]
    pub fn user_message(&self) -> &str {
        &self.message
    }

    /// Whether the wizard can recover from this error by retrying
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        self.code.is_recoverable()
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required intake field
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Please fill in the {field} field"),
        )
    }

    /// Value out of its accepted range
    #[must_use]
    pub fn out_of_range(field: &str, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be between {min} and {max}"),
        )
    }

    /// Operation attempted from the wrong wizard state
    #[must_use]
    pub fn invalid_state(operation: &str, state: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidState,
            format!("Cannot {operation} while in the {state} step"),
        )
    }

    /// Red flags raised and not acknowledged
    #[must_use]
    pub fn safety_gate(flag_count: usize) -> Self {
        Self::new(
            ErrorCode::SafetyGate,
            format!(
                "{flag_count} safety concern(s) were flagged. Please consult a healthcare \
                 professional, or explicitly confirm you want to continue."
            ),
        )
    }

    /// Suggestion service produced no usable exercises
    #[must_use]
    pub fn plan_generation_empty() -> Self {
        Self::new(
            ErrorCode::PlanGenerationEmpty,
            "No exercises could be generated. Please try regenerating the plan.",
        )
    }

    /// Configuration value missing
    #[must_use]
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Configuration value invalid
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service unreachable or timed out
    #[must_use]
    pub fn external_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::new(ErrorCode::StorageError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_codes() {
        assert!(ErrorCode::SafetyGate.is_recoverable());
        assert!(ErrorCode::AnalysisFailed.is_recoverable());
        assert!(ErrorCode::NoMovementsAssessed.is_recoverable());
        assert!(!ErrorCode::ConfigMissing.is_recoverable());
        assert!(!ErrorCode::InternalError.is_recoverable());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::PlanGenerationEmpty).unwrap();
        assert_eq!(json, "\"PLAN_GENERATION_EMPTY\"");
    }

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::out_of_range("Age", 18, 100);
        let rendered = error.to_string();
        assert!(rendered.contains("outside the acceptable range"));
        assert!(rendered.contains("Age must be between 18 and 100"));
        assert_eq!(error.user_message(), "Age must be between 18 and 100");
    }

    #[test]
    fn test_source_chaining() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.mp4");
        let error = AppError::from(io);
        assert_eq!(error.code, ErrorCode::StorageError);
        assert!(StdError::source(&error).is_some());
    }
}
