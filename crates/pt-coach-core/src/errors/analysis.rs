// ABOUTME: Movement analysis error type for the external video-analysis contract
// ABOUTME: Every variant is recovered by the wizard as a zero-contribution result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use thiserror::Error;

use super::{AppError, ErrorCode};
use crate::constants::messages::ANALYSIS_RETRY;

/// Failure modes of a single movement analysis
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The analysis service reported an error or could not be reached
    #[error("Analysis service error: {0}")]
    Service(String),

    /// The analysis service did not answer within the configured timeout
    #[error("Analysis timed out after {0}s")]
    Timeout(u64),

    /// The response did not match the `metrics` / `weak_muscles` / `fall_risk` contract
    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    /// The configured provider cannot accept video input
    #[error("Provider '{0}' does not support video input")]
    UnsupportedCapability(String),
}

impl AnalysisError {
    /// Message shown to the user asking them to retry the upload
    #[must_use]
    pub const fn retry_message(&self) -> &'static str {
        ANALYSIS_RETRY
    }
}

impl From<AppError> for AnalysisError {
    fn from(error: AppError) -> Self {
        Self::Service(error.message)
    }
}

impl From<AnalysisError> for AppError {
    fn from(error: AnalysisError) -> Self {
        Self::new(ErrorCode::AnalysisFailed, error.retry_message()).with_source(error)
    }
}
