// ABOUTME: Coaching service contract used by the wizard for video analysis and plan suggestions
// ABOUTME: Adapters: an LLM-backed service and a deterministic offline demo service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

//! Coaching service layer
//!
//! The wizard depends only on [`CoachingService`]. Both capabilities are
//! opaque: how a video is analyzed or a plan is written is up to the adapter.

/// Deterministic offline service
pub mod demo;
/// LLM-backed service
pub mod llm_coach;
/// Response parsing for the analysis and suggestion contracts
pub mod parsing;
/// Video clip loading and fingerprinting
pub mod video;

pub use demo::DemoCoachingService;
pub use llm_coach::LlmCoachingService;
pub use parsing::{parse_analysis_response, parse_plan_response, strip_code_fences};
pub use video::VideoClip;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AppResult};
use crate::models::{AssessmentAggregate, ExercisePlan, MovementKind, MovementResult, PlanAdjustment, UserProfile};

/// Everything the suggestion service needs to write a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Profile captured at intake
    pub profile: UserProfile,
    /// Assessment so far
    pub aggregate: AssessmentAggregate,
    /// Free-text feedback from the user
    pub feedback_text: Option<String>,
    /// Classification of the last session's exercises
    pub adjustment: Option<PlanAdjustment>,
}

impl PlanRequest {
    /// Request built from the profile and assessment only
    #[must_use]
    pub const fn new(profile: UserProfile, aggregate: AssessmentAggregate) -> Self {
        Self {
            profile,
            aggregate,
            feedback_text: None,
            adjustment: None,
        }
    }

    /// Attach free-text feedback, ignoring blank input
    #[must_use]
    pub fn with_feedback(mut self, feedback: Option<&str>) -> Self {
        self.feedback_text = feedback
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned);
        self
    }

    /// Attach adjustment hints, ignoring an empty adjustment
    #[must_use]
    pub fn with_adjustment(mut self, adjustment: &PlanAdjustment) -> Self {
        self.adjustment = (!adjustment.is_empty()).then(|| adjustment.clone());
        self
    }
}

/// Movement analysis and exercise suggestion
#[async_trait]
pub trait CoachingService: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Analyze one movement video
    ///
    /// `variant` names the safer version of the movement the user was asked
    /// to perform, when one was recommended.
    async fn analyze_movement(
        &self,
        video: &VideoClip,
        kind: MovementKind,
        variant: Option<&str>,
    ) -> Result<MovementResult, AnalysisError>;

    /// Suggest up to five exercises
    async fn suggest_plan(&self, request: &PlanRequest) -> AppResult<ExercisePlan>;
}

#[async_trait]
impl<T: CoachingService + ?Sized> CoachingService for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn analyze_movement(
        &self,
        video: &VideoClip,
        kind: MovementKind,
        variant: Option<&str>,
    ) -> Result<MovementResult, AnalysisError> {
        (**self).analyze_movement(video, kind, variant).await
    }

    async fn suggest_plan(&self, request: &PlanRequest) -> AppResult<ExercisePlan> {
        (**self).suggest_plan(request).await
    }
}

#[async_trait]
impl<T: CoachingService + ?Sized> CoachingService for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn analyze_movement(
        &self,
        video: &VideoClip,
        kind: MovementKind,
        variant: Option<&str>,
    ) -> Result<MovementResult, AnalysisError> {
        (**self).analyze_movement(video, kind, variant).await
    }

    async fn suggest_plan(&self, request: &PlanRequest) -> AppResult<ExercisePlan> {
        (**self).suggest_plan(request).await
    }
}
