// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides a scripted coaching service, intake forms, clips, and quiet logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pt_coach`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use pt_coach::config::{IntakeConfig, WizardConfig};
use pt_coach::errors::{AnalysisError, AppError, AppResult};
use pt_coach::models::{ComplaintType, ExercisePlan, FallRisk, Gender, MovementKind, MovementResult};
use pt_coach::services::{CoachingService, PlanRequest, VideoClip};
use pt_coach::wizard::{IntakeForm, SessionWizard};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// Scripted coaching service
// ============================================================================

/// Coaching service with canned answers and call counters
#[derive(Default)]
pub struct FakeCoachingService {
    analyses: BTreeMap<MovementKind, Result<MovementResult, AnalysisError>>,
    plans: Mutex<VecDeque<AppResult<ExercisePlan>>>,
    fallback_plan: ExercisePlan,
    delay: Option<Duration>,
    analyze_calls: AtomicUsize,
    plan_calls: AtomicUsize,
    variants: Mutex<Vec<Option<String>>>,
    plan_requests: Mutex<Vec<PlanRequest>>,
}

impl FakeCoachingService {
    /// Every movement analyzes to a low-risk empty result; plans are five exercises
    pub fn new() -> Self {
        Self {
            fallback_plan: five_exercise_plan(),
            ..Self::default()
        }
    }

    pub fn with_analysis(mut self, kind: MovementKind, result: MovementResult) -> Self {
        self.analyses.insert(kind, Ok(result));
        self
    }

    pub fn with_analysis_error(mut self, kind: MovementKind, error: AnalysisError) -> Self {
        self.analyses.insert(kind, Err(error));
        self
    }

    /// Queue a plan answer; once the queue is drained the fallback plan is used
    pub fn with_plan(self, plan: AppResult<ExercisePlan>) -> Self {
        self.plans.lock().unwrap().push_back(plan);
        self
    }

    pub fn with_fallback_plan(mut self, plan: ExercisePlan) -> Self {
        self.fallback_plan = plan;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn plan_calls(&self) -> usize {
        self.plan_calls.load(Ordering::SeqCst)
    }

    pub fn variants(&self) -> Vec<Option<String>> {
        self.variants.lock().unwrap().clone()
    }

    pub fn plan_requests(&self) -> Vec<PlanRequest> {
        self.plan_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CoachingService for FakeCoachingService {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn analyze_movement(
        &self,
        _video: &VideoClip,
        kind: MovementKind,
        variant: Option<&str>,
    ) -> Result<MovementResult, AnalysisError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.variants.lock().unwrap().push(variant.map(str::to_owned));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.analyses
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Ok(MovementResult::default()))
    }

    async fn suggest_plan(&self, request: &PlanRequest) -> AppResult<ExercisePlan> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        self.plan_requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let queued = self.plans.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(self.fallback_plan.clone()))
    }
}

/// Plan answer the service could not produce
pub fn failed_plan() -> AppResult<ExercisePlan> {
    Err(AppError::external_service("fake", "suggestion failed"))
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn five_exercise_plan() -> ExercisePlan {
    ExercisePlan::from_exercises([
        "Seated marching - 2 x 10",
        "Sit-to-stand from a high chair - 2 x 8",
        "Seated heel raises - 2 x 15",
        "Supported side steps - 2 x 10 each way",
        "Tandem stance at counter - 3 x 20s",
    ]
    .map(str::to_owned))
}

pub fn movement_result(weak: &[&str], fall_risk: FallRisk) -> MovementResult {
    MovementResult {
        metrics: BTreeMap::from([("repetitions".to_owned(), 5.0)]),
        weak_muscles: weak.iter().map(|w| (*w).to_owned()).collect(),
        fall_risk,
    }
}

/// Distinct clip per `label`
pub fn clip(label: &str) -> VideoClip {
    VideoClip::new(
        format!("{label}.mp4"),
        "video/mp4",
        format!("fake video bytes for {label}").into_bytes(),
    )
    .unwrap()
}

pub fn intake_form(age: u8, baseline_pain: u8) -> IntakeForm {
    IntakeForm {
        first_name: Some("Sam".to_owned()),
        gender: Gender::PreferNotToSay,
        age,
        baseline_pain,
        chief_complaint_type: ComplaintType::Pain,
        complaint: "Right knee aches on stairs".to_owned(),
        override_seated: false,
    }
}

pub fn wizard(service: FakeCoachingService) -> SessionWizard<FakeCoachingService> {
    init_test_logging();
    SessionWizard::new(IntakeConfig::default(), WizardConfig::default(), service)
}

pub fn wizard_with_limits(
    service: FakeCoachingService,
    limits: WizardConfig,
) -> SessionWizard<FakeCoachingService> {
    init_test_logging();
    SessionWizard::new(IntakeConfig::default(), limits, service)
}
