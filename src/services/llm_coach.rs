// ABOUTME: Coaching service backed by any LlmProvider: video analysis and plan suggestions
// ABOUTME: Sends video inline to vision-capable providers and parses contract responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::parsing::{parse_analysis_response, parse_plan_response};
use super::{CoachingService, PlanRequest, VideoClip};
use crate::errors::{AnalysisError, AppError, AppResult};
use crate::llm::prompts::{render, COACH_SYSTEM_PROMPT, EXERCISE_PLAN_PROMPT, MOVEMENT_ANALYSIS_PROMPT};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::logging::SessionLogger;
use crate::models::{ExercisePlan, MovementKind, MovementResult};

/// Low temperature keeps analyses repeatable
const ANALYSIS_TEMPERATURE: f32 = 0.2;
const PLAN_TEMPERATURE: f32 = 0.6;

/// [`CoachingService`] that delegates both capabilities to an LLM
#[derive(Debug)]
pub struct LlmCoachingService<P> {
    provider: P,
}

impl<P: LlmProvider> LlmCoachingService<P> {
    /// Wrap a provider
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Underlying provider
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Confirm the provider answers before a session relies on it
    ///
    /// # Errors
    ///
    /// `ExternalServiceUnavailable` when the provider reports itself
    /// unhealthy, or the provider's own error when it cannot be reached.
    pub async fn check_provider(&self) -> AppResult<()> {
        if self.provider.health_check().await? {
            debug!(provider = self.provider.name(), "Provider health check passed");
            Ok(())
        } else {
            Err(AppError::external_unavailable(
                self.provider.display_name(),
                "health check reported the service as unavailable",
            ))
        }
    }

    /// Chat request carrying the analysis prompt and the clip
    #[must_use]
    pub fn analysis_request(&self, video: &VideoClip, kind: MovementKind, variant: Option<&str>) -> ChatRequest {
        let variant = variant.map(|v| format!(" ({v})")).unwrap_or_default();
        let prompt = render(
            MOVEMENT_ANALYSIS_PROMPT,
            &[("movement", kind.as_str()), ("variant", &variant)],
        );

        let request = ChatRequest::new(vec![
            ChatMessage::system(COACH_SYSTEM_PROMPT),
            ChatMessage::user(prompt).with_attachment(video.mime_type(), video.bytes().to_vec()),
        ])
        .with_temperature(ANALYSIS_TEMPERATURE);

        if self.provider.capabilities().supports_json_mode() {
            request.with_json_response()
        } else {
            request
        }
    }

    /// Exercise suggestion prompt for `request`
    #[must_use]
    pub fn plan_prompt(request: &PlanRequest) -> String {
        let profile = &request.profile;
        let aggregate = &request.aggregate;

        let seated = if profile.seated_recommended {
            "Seated-friendly exercises are recommended; prefer chair-based options."
        } else {
            "Standing exercises are acceptable."
        };
        let weak_muscles = join_or_none(&aggregate.weak_muscles);
        let pain_areas = join_or_none(&aggregate.pain_areas);
        let feedback = request
            .feedback_text
            .as_deref()
            .map(|text| format!("Client feedback: {text}\n\n"))
            .unwrap_or_default();
        let adjustments = request
            .adjustment
            .as_ref()
            .map(|adjustment| {
                format!(
                    "Adjust last session's exercises as follows:\n{}\n",
                    adjustment.to_prompt_hints()
                )
            })
            .unwrap_or_default();

        render(
            EXERCISE_PLAN_PROMPT,
            &[
                ("age", &profile.age.to_string()),
                ("pain", &profile.baseline_pain.value().to_string()),
                ("complaint_type", profile.chief_complaint_type.label()),
                ("complaint", profile.complaint.trim()),
                ("seated", seated),
                ("weak_muscles", &weak_muscles),
                ("fall_risk", aggregate.fall_risk.as_str()),
                ("pain_areas", &pain_areas),
                ("feedback", &feedback),
                ("adjustments", &adjustments),
            ],
        )
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none identified".to_owned()
    } else {
        items.join(", ")
    }
}

#[async_trait]
impl<P: LlmProvider> CoachingService for LlmCoachingService<P> {
    fn name(&self) -> &'static str {
        self.provider.name()
    }

    async fn analyze_movement(
        &self,
        video: &VideoClip,
        kind: MovementKind,
        variant: Option<&str>,
    ) -> Result<MovementResult, AnalysisError> {
        if !self.provider.capabilities().supports_vision() {
            return Err(AnalysisError::UnsupportedCapability(
                self.provider.display_name().to_owned(),
            ));
        }

        let request = self.analysis_request(video, kind, variant);
        let started = Instant::now();
        let response = self.provider.complete(&request).await;
        SessionLogger::log_service_call("analyze_movement", self.provider.name(), started.elapsed(), response.is_ok());

        let response = response?;
        parse_analysis_response(&response.content).inspect_err(|e| {
            warn!(movement = %kind, error = %e, "Analysis response outside contract");
        })
    }

    async fn suggest_plan(&self, request: &PlanRequest) -> AppResult<ExercisePlan> {
        let chat = ChatRequest::new(vec![
            ChatMessage::system(COACH_SYSTEM_PROMPT),
            ChatMessage::user(Self::plan_prompt(request)),
        ])
        .with_temperature(PLAN_TEMPERATURE);

        let started = Instant::now();
        let response = self.provider.complete(&chat).await;
        SessionLogger::log_service_call("suggest_plan", self.provider.name(), started.elapsed(), response.is_ok());

        let plan = parse_plan_response(&response?.content);
        debug!(exercises = plan.len(), "Parsed exercise suggestion");
        Ok(plan)
    }
}
