// ABOUTME: Configuration error types for environment loading and validation
// ABOUTME: Defines error variants for invalid ranges, missing fields, and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

//! Configuration error types.

use thiserror::Error;

use crate::errors::AppError;

/// Configuration-related errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Value outside acceptable range
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Required configuration value is missing
    #[error("Missing required value: {0}")]
    MissingField(&'static str),

    /// Environment variable could not be parsed
    #[error("Failed to parse {name}='{value}'")]
    Parse {
        /// Environment variable name
        name: &'static str,
        /// Raw value found
        value: String,
    },
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::MissingField(_) => Self::config_missing(error.to_string()),
            ConfigError::InvalidRange(_) | ConfigError::Parse { .. } => {
                Self::config_invalid(error.to_string())
            }
        }
    }
}
