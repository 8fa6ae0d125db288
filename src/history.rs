// ABOUTME: Append-only in-memory history of completed sessions with a progress summary
// ABOUTME: Lives for the process lifetime; exportable as JSON, never persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::models::{ExercisePlan, FallRisk, SessionRecord};

/// Completed sessions in the order they finished
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHistory {
    records: Vec<SessionRecord>,
}

/// Progress across every recorded session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Number of recorded sessions
    pub sessions: usize,
    /// Post-session pain of the first session
    pub first_pain: u8,
    /// Post-session pain of the latest session
    pub latest_pain: u8,
    /// `latest_pain - first_pain`; negative means improvement
    pub pain_change: i16,
    /// Highest fall risk in any session
    pub highest_fall_risk: FallRisk,
    /// Plan suggested at the end of the latest session
    pub latest_next_plan: ExercisePlan,
}

impl SessionHistory {
    /// Empty history
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a finished session
    pub fn append(&mut self, record: SessionRecord) {
        self.records.push(record);
    }

    /// All records, oldest first
    #[must_use]
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Most recent record
    #[must_use]
    pub fn last(&self) -> Option<&SessionRecord> {
        self.records.last()
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Summary over all records, `None` when empty
    #[must_use]
    pub fn progress_summary(&self) -> Option<ProgressSummary> {
        let first = self.records.first()?;
        let latest = self.records.last()?;
        let highest_fall_risk = self
            .records
            .iter()
            .map(|record| record.assessment.fall_risk)
            .max()
            .unwrap_or_default();

        Some(ProgressSummary {
            sessions: self.records.len(),
            first_pain: first.post_session_pain.value(),
            latest_pain: latest.post_session_pain.value(),
            pain_change: i16::from(latest.post_session_pain.value())
                - i16::from(first.post_session_pain.value()),
            highest_fall_risk,
            latest_next_plan: latest.next_plan.clone(),
        })
    }

    /// Pretty JSON export
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if a record cannot be serialized.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
