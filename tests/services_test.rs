// ABOUTME: Tests for the coaching services, video loading, and LLM response handling
// ABOUTME: Uses a scripted LLM provider so no network access is needed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use common::{clip, init_test_logging, intake_form};
use pt_coach::config::{IntakeConfig, WizardConfig};
use pt_coach::errors::{AnalysisError, AppError, ErrorCode};
use pt_coach::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use pt_coach::models::{
    AssessmentAggregate, Difficulty, ExerciseFeedback, FallRisk, MovementKind, PlanAdjustment,
};
use pt_coach::services::{
    CoachingService, DemoCoachingService, LlmCoachingService, PlanRequest, VideoClip,
};
use pt_coach::wizard::{SafetyAnswers, SessionWizard, WizardSession, WizardState};

// ============================================================================
// Scripted provider
// ============================================================================

struct ScriptedProvider {
    capabilities: LlmCapabilities,
    reply: Result<String, ErrorCode>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    fn replying(capabilities: LlmCapabilities, content: &str) -> Self {
        Self {
            capabilities,
            reply: Ok(content.to_owned()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failing(code: ErrorCode) -> Self {
        Self {
            capabilities: LlmCapabilities::full_featured(),
            reply: Err(code),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn last_request(&self) -> ChatRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    fn default_model(&self) -> &str {
        "scripted-1"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "scripted-1".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            Err(code) => Err(AppError::new(*code, "scripted failure")),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(self.reply.is_ok())
    }
}

fn plan_request(seated: bool) -> PlanRequest {
    let profile = intake_form(if seated { 70 } else { 30 }, 2)
        .validate(&IntakeConfig::default())
        .unwrap();
    let aggregate = AssessmentAggregate {
        weak_muscles: vec!["gluteus medius".to_owned()],
        fall_risk: FallRisk::Medium,
        pain_areas: vec!["Knee".to_owned()],
        ..AssessmentAggregate::default()
    };
    PlanRequest::new(profile, aggregate)
}

// ============================================================================
// LLM coaching service
// ============================================================================

#[tokio::test]
async fn test_fenced_analysis_reply_is_parsed() {
    init_test_logging();
    let reply = "```json\n{\"metrics\": {\"squat_count\": 4}, \"weak_muscles\": [\"quadriceps\"], \"fall_risk\": \"high\"}\n```";
    let service = LlmCoachingService::new(ScriptedProvider::replying(LlmCapabilities::full_featured(), reply));

    let result = service
        .analyze_movement(&clip("squat"), MovementKind::Squatting, Some("chair squat"))
        .await
        .unwrap();
    assert_eq!(result.fall_risk, FallRisk::High);
    assert_eq!(result.weak_muscles, vec!["quadriceps"]);

    let request = service.provider().last_request();
    assert!(request.has_attachments());
    assert!(request.json_response);
    let prompt = &request.messages[1].content;
    assert!(prompt.contains("squatting"));
    assert!(prompt.contains("chair squat"));
}

#[tokio::test]
async fn test_reply_with_extra_keys_is_malformed() {
    let reply = r#"{"metrics": {}, "weak_muscles": [], "fall_risk": "low", "notes": "hi"}"#;
    let service = LlmCoachingService::new(ScriptedProvider::replying(LlmCapabilities::full_featured(), reply));

    let error = service
        .analyze_movement(&clip("walk"), MovementKind::Walking, None)
        .await
        .unwrap_err();
    assert!(matches!(error, AnalysisError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_text_only_provider_cannot_analyze_video() {
    let provider = ScriptedProvider::replying(LlmCapabilities::text_only(), "{}");
    let service = LlmCoachingService::new(provider);

    let error = service
        .analyze_movement(&clip("walk"), MovementKind::Walking, None)
        .await
        .unwrap_err();
    assert_eq!(error, AnalysisError::UnsupportedCapability("Scripted".to_owned()));
    assert!(service.provider().requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_provider_failure_becomes_service_error() {
    let service = LlmCoachingService::new(ScriptedProvider::failing(ErrorCode::ExternalRateLimited));
    let error = service
        .analyze_movement(&clip("walk"), MovementKind::Walking, None)
        .await
        .unwrap_err();
    assert!(matches!(error, AnalysisError::Service(_)));
}

#[tokio::test]
async fn test_provider_check_passes_when_healthy() {
    let service = LlmCoachingService::new(ScriptedProvider::replying(LlmCapabilities::full_featured(), "{}"));
    service.check_provider().await.unwrap();
    assert!(service.provider().requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unhealthy_provider_is_reported_unavailable() {
    let service = LlmCoachingService::new(ScriptedProvider::failing(ErrorCode::ExternalServiceError));
    let error = service.check_provider().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    assert!(error.user_message().contains("Scripted"));
}

#[tokio::test]
async fn test_plan_reply_lines_become_exercises() {
    let reply = "1. Clamshells - 2 x 12\n2. Side-lying leg lifts - 2 x 10\n\n- Wall sits - 3 x 20s\n";
    let service = LlmCoachingService::new(ScriptedProvider::replying(LlmCapabilities::full_featured(), reply));

    let plan = service.suggest_plan(&plan_request(false)).await.unwrap();
    assert_eq!(plan.len(), 3);
    assert_eq!(plan.get(0), Some("Clamshells - 2 x 12"));
    assert_eq!(plan.get(2), Some("Wall sits - 3 x 20s"));
}

#[test]
fn test_plan_prompt_includes_assessment_feedback_and_hints() {
    let adjustment = PlanAdjustment {
        regress: vec!["Step-ups".to_owned()],
        ..PlanAdjustment::default()
    };
    let request = plan_request(true)
        .with_feedback(Some("Knee felt warm"))
        .with_adjustment(&adjustment);

    let prompt = LlmCoachingService::<ScriptedProvider>::plan_prompt(&request);
    assert!(prompt.contains("gluteus medius"));
    assert!(prompt.contains("medium"));
    assert!(prompt.contains("Knee"));
    assert!(prompt.contains("Knee felt warm"));
    assert!(prompt.contains("Step-ups"));
    assert!(prompt.contains("Seated-friendly"));
    assert!(!prompt.contains("{{"));
}

#[test]
fn test_blank_feedback_and_empty_adjustment_are_dropped() {
    let request = plan_request(false)
        .with_feedback(Some("   "))
        .with_adjustment(&PlanAdjustment::default());
    assert!(request.feedback_text.is_none());
    assert!(request.adjustment.is_none());
}

// ============================================================================
// Video loading
// ============================================================================

#[tokio::test]
async fn test_video_loads_from_disk_with_inferred_type() {
    let mut file = tempfile::Builder::new().suffix(".MOV").tempfile().unwrap();
    file.write_all(b"not really a movie").unwrap();

    let video = VideoClip::from_path(file.path(), 1024).await.unwrap();
    assert_eq!(video.mime_type(), "video/quicktime");
    assert_eq!(video.len(), 18);
    assert_eq!(video.fingerprint(), clip_with(b"not really a movie").fingerprint());
}

#[tokio::test]
async fn test_video_over_limit_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
    file.write_all(&[0_u8; 64]).unwrap();

    let error = VideoClip::from_path(file.path(), 32).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_unsupported_or_missing_video() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let error = VideoClip::from_path(file.path(), 1024).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let dir = tempfile::tempdir().unwrap();
    let error = VideoClip::from_path(dir.path().join("gone.mp4"), 1024)
        .await
        .unwrap_err();
    assert_ne!(error.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_empty_video_file_is_rejected() {
    let file = tempfile::Builder::new().suffix(".webm").tempfile().unwrap();
    let error = VideoClip::from_path(file.path(), 1024).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

fn clip_with(bytes: &[u8]) -> VideoClip {
    VideoClip::new("other-name.mp4", "video/mp4", bytes.to_vec()).unwrap()
}

// ============================================================================
// Demo service through the wizard
// ============================================================================

#[tokio::test]
async fn test_demo_service_completes_a_cycle() {
    init_test_logging();
    let wizard = SessionWizard::new(
        IntakeConfig::default(),
        WizardConfig::default(),
        DemoCoachingService,
    );
    let mut session = WizardSession::new();
    wizard.submit_intake(&mut session, &intake_form(72, 5)).unwrap();

    for kind in MovementKind::ALL {
        let outcome = wizard
            .assess_movement(&mut session, &clip(kind.as_str()), kind)
            .await
            .unwrap();
        assert!(outcome.is_analyzed());
    }
    assert_eq!(session.aggregate().fall_risk, FallRisk::Medium);
    assert!(session
        .aggregate()
        .metrics
        .values()
        .all(|metrics| metrics.contains_key("supported_variant")));

    wizard.complete_movement_screens(&mut session).unwrap();
    wizard
        .submit_safety_check(&mut session, &SafetyAnswers::none())
        .await
        .unwrap();
    assert_eq!(session.plan().len(), 5);
    assert!(session.plan().iter().all(|exercise| exercise.starts_with("Seated")));

    let first = session.plan().get(0).unwrap().to_owned();
    wizard.record_feedback(&mut session, true, Difficulty::Hard).unwrap();
    while session.current_exercise().is_some() {
        wizard
            .record_feedback(&mut session, false, Difficulty::JustRight)
            .unwrap();
    }
    wizard.complete_exercise_session(&mut session).unwrap();
    let record = wizard.finish_session(&mut session, 4, "A bit sore").await.unwrap();

    assert_eq!(
        record.feedback[0],
        ExerciseFeedback {
            exercise: first.clone(),
            pain_increased: true,
            difficulty: Difficulty::Hard,
        }
    );
    assert_eq!(record.adjustment.regress, vec![first.clone()]);
    assert!(!record.next_plan.iter().any(|exercise| exercise == first));
    assert_eq!(session.state(), WizardState::SessionEnd);
}
