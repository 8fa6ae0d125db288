// ABOUTME: Parsers for the movement-analysis JSON contract and newline-delimited plans
// ABOUTME: Strips Markdown code fences and rejects responses outside the contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use crate::errors::AnalysisError;
use crate::models::{ExercisePlan, MovementResult};

/// Remove a surrounding Markdown code fence, with or without a language tag
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // the language tag runs up to the first newline
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches("json"),
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse an analysis response into a [`MovementResult`]
///
/// # Errors
///
/// Returns `MalformedResponse` for invalid JSON, missing or extra keys, an
/// unknown fall-risk label, or a non-numeric metric.
pub fn parse_analysis_response(text: &str) -> Result<MovementResult, AnalysisError> {
    let body = strip_code_fences(text);
    if body.is_empty() {
        return Err(AnalysisError::MalformedResponse("empty response".to_owned()));
    }
    serde_json::from_str(body).map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
}

/// Parse a suggestion response: one exercise per non-empty line, first five kept
///
/// Leading list markers (`-`, `*`, `1.`, `2)`) are removed.
#[must_use]
pub fn parse_plan_response(text: &str) -> ExercisePlan {
    ExercisePlan::from_exercises(
        strip_code_fences(text)
            .lines()
            .map(strip_list_marker)
            .map(str::to_owned),
    )
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return rest;
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(after) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return after;
        }
    }
    line
}
