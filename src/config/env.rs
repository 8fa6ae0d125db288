// ABOUTME: Helpers for reading typed configuration values from environment variables
// ABOUTME: Unset variables fall back to defaults; malformed values are reported
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::env;
use std::str::FromStr;

use super::ConfigError;

/// Read `name` and parse it, returning `default` when unset or empty
///
/// # Errors
///
/// Returns `ConfigError::Parse` when the variable is set but cannot be parsed.
pub fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::Parse { name, value: raw })
        }
        _ => Ok(default),
    }
}

/// Read a boolean flag accepting `true`/`1`/`yes` and `false`/`0`/`no`
///
/// # Errors
///
/// Returns `ConfigError::Parse` for any other non-empty value.
pub fn flag_or(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::Parse { name, value: raw }),
        },
        _ => Ok(default),
    }
}

/// Read a non-empty string value
#[must_use]
pub fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
