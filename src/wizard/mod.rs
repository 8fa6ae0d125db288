// ABOUTME: Session wizard state machine driving one user through an assessment cycle
// ABOUTME: Validates each step, folds analyses, gates on safety flags, and records history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

//! # Session Wizard
//!
//! Six strictly sequential steps:
//!
//! ```text
//! Intake -> MovementScreens -> SafetyCheck -> ExercisePlan -> PostSession -> SessionEnd
//!    ^                                                                          |
//!    +----------------------------------- restart ------------------------------+
//! ```
//!
//! The wizard holds only configuration and the coaching service. All data
//! for a cycle lives in a [`WizardSession`] passed by `&mut`, so one
//! operation completes before the next can start.
//!
//! Calling an operation from the wrong step returns `InvalidState` and
//! changes nothing. Unmet preconditions return a recoverable [`AppError`]
//! and leave the step unchanged. Service failures never escape: a failed
//! analysis becomes [`MovementOutcome::Failed`] and a failed suggestion
//! becomes [`PlanOutcome::Empty`].

mod intake;
mod outcome;
mod safety;
mod session;
mod state;

pub use intake::IntakeForm;
pub use outcome::{FeedbackProgress, MovementOutcome, PlanOutcome, Transition};
pub use safety::SafetyAnswers;
pub use session::WizardSession;
pub use state::WizardState;

use chrono::{DateTime, Utc};
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{IntakeConfig, WizardConfig};
use crate::constants::messages::NO_MOVEMENTS_ASSESSED;
use crate::errors::{AnalysisError, AppError, AppResult, ErrorCode};
use crate::intelligence::{compute_plan_adjustment, fold_movement_result, record_pain_areas};
use crate::logging::SessionLogger;
use crate::models::{
    Difficulty, ExerciseFeedback, ExercisePlan, MovementKind, MovementResult, PainLevel,
    SessionRecord, UserProfile,
};
use crate::services::{CoachingService, PlanRequest, VideoClip};

/// Drives a [`WizardSession`] through the assessment cycle
#[derive(Debug)]
pub struct SessionWizard<S> {
    intake: IntakeConfig,
    limits: WizardConfig,
    service: S,
}

impl<S: CoachingService> SessionWizard<S> {
    /// Create a wizard over `service`
    #[must_use]
    pub const fn new(intake: IntakeConfig, limits: WizardConfig, service: S) -> Self {
        Self {
            intake,
            limits,
            service,
        }
    }

    /// Intake rules in use
    #[must_use]
    pub const fn intake_config(&self) -> &IntakeConfig {
        &self.intake
    }

    /// Limits in use
    #[must_use]
    pub const fn limits(&self) -> &WizardConfig {
        &self.limits
    }

    /// Coaching service in use
    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }

    // ========================================================================
    // Intake
    // ========================================================================

    /// Validate the intake form and move to movement screens
    ///
    /// # Errors
    ///
    /// `InvalidState` outside Intake; validation errors from [`IntakeForm::validate`].
    pub fn submit_intake(&self, session: &mut WizardSession, form: &IntakeForm) -> AppResult<Transition> {
        Self::require_state(session, WizardState::Intake, "submit the intake form")?;
        let profile = form.validate(&self.intake)?;
        debug!(
            age = profile.age,
            baseline_pain = profile.baseline_pain.value(),
            seated_recommended = profile.seated_recommended,
            "Intake accepted"
        );
        session.profile = Some(profile);
        Ok(Self::advance(session))
    }

    /// Whether a reassessment should be offered at `now`
    ///
    /// True only at Intake, with history, when more than the configured
    /// interval has passed since the last recorded session.
    #[must_use]
    pub fn reassessment_due(&self, session: &WizardSession, now: DateTime<Utc>) -> bool {
        session.state == WizardState::Intake
            && session
                .history
                .last()
                .is_some_and(|last| now - last.timestamp > self.limits.reassessment_interval())
    }

    /// Skip intake and go straight to movement screens with the last profile
    ///
    /// # Errors
    ///
    /// `InvalidState` outside Intake or when no reassessment is due.
    pub fn start_reassessment(&self, session: &mut WizardSession, now: DateTime<Utc>) -> AppResult<Transition> {
        Self::require_state(session, WizardState::Intake, "start a reassessment")?;
        if !self.reassessment_due(session, now) {
            return Err(AppError::new(
                ErrorCode::InvalidState,
                "No reassessment is due yet",
            ));
        }
        let profile = session
            .history
            .last()
            .map(|record| record.profile.clone())
            .ok_or_else(|| AppError::internal("Reassessment due without history"))?;

        info!(session.id = %session.id, "Starting reassessment with previous profile");
        session.profile = Some(profile);
        session.reassessment = true;
        Ok(Self::advance(session))
    }

    // ========================================================================
    // Movement screens
    // ========================================================================

    /// Analyze one movement video and fold the result into the assessment
    ///
    /// A clip whose content was already analyzed for the same movement this
    /// cycle is not sent again; its earlier result is reused. The same bytes
    /// submitted for another movement are analyzed afresh.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside movement screens, `InvalidInput` for a clip over
    /// the size limit. Analysis failures are returned as
    /// [`MovementOutcome::Failed`], not as errors.
    pub async fn assess_movement(
        &self,
        session: &mut WizardSession,
        video: &VideoClip,
        kind: MovementKind,
    ) -> AppResult<MovementOutcome> {
        Self::require_state(session, WizardState::MovementScreens, "assess a movement")?;
        if video.len() > self.limits.max_video_bytes {
            return Err(AppError::invalid_input(format!(
                "Video is larger than the {} MiB limit",
                self.limits.max_video_bytes / (1024 * 1024)
            )));
        }

        let cache_key = (video.fingerprint(), kind);
        if let Some(previous) = session.analyzed_clips.get(&cache_key).cloned() {
            debug!(movement = %kind, "Clip already analyzed, reusing result");
            Self::fold(session, &previous, kind);
            return Ok(MovementOutcome::Analyzed {
                kind,
                result: previous,
                reused: true,
            });
        }

        let variant = session
            .profile
            .as_ref()
            .filter(|profile| profile.seated_recommended)
            .map(|_| kind.seated_variant());

        match self.analyze_with_timeout(video, kind, variant).await {
            Ok(result) => {
                SessionLogger::log_movement_analysis(&session.id.to_string(), kind, true, Some(result.fall_risk));
                session.analyzed_clips.insert(cache_key, result.clone());
                Self::fold(session, &result, kind);
                Ok(MovementOutcome::Analyzed {
                    kind,
                    result,
                    reused: false,
                })
            }
            Err(error) => {
                SessionLogger::log_movement_analysis(&session.id.to_string(), kind, false, None);
                Ok(MovementOutcome::Failed {
                    kind,
                    message: error.retry_message().to_owned(),
                    reason: error.to_string(),
                })
            }
        }
    }

    /// Leave movement screens once at least one movement was analyzed
    ///
    /// # Errors
    ///
    /// `InvalidState` outside movement screens. `NoMovementsAssessed` when
    /// nothing was analyzed; the synthetic flag is added to the pain flags.
    pub fn complete_movement_screens(&self, session: &mut WizardSession) -> AppResult<Transition> {
        Self::require_state(session, WizardState::MovementScreens, "finish movement screens")?;
        if session.performed.is_empty() {
            Self::raise_flag(session, NO_MOVEMENTS_ASSESSED);
            SessionLogger::log_safety_flags(&session.id.to_string(), session.pain_flags.len(), false);
            return Err(AppError::new(
                ErrorCode::NoMovementsAssessed,
                "Upload at least one movement video that can be analyzed before continuing",
            ));
        }
        Ok(Self::advance(session))
    }

    // ========================================================================
    // Safety check
    // ========================================================================

    /// Record checklist answers; with no flags, continue and generate the plan
    ///
    /// # Errors
    ///
    /// `InvalidState` outside the safety step, `InvalidInput` for an unknown
    /// question, and `SafetyGate` when any pain flag is raised. Answers are
    /// recorded even when the gate blocks.
    pub async fn submit_safety_check(
        &self,
        session: &mut WizardSession,
        answers: &SafetyAnswers,
    ) -> AppResult<PlanOutcome> {
        Self::require_state(session, WizardState::SafetyCheck, "submit the safety check")?;
        let flags = answers.red_flag_texts()?;

        for flag in flags {
            Self::raise_flag(session, flag);
        }
        session.aggregate = record_pain_areas(&session.aggregate, &answers.pain_areas);

        if session.pain_flags.is_empty() {
            return Ok(self.enter_exercise_plan(session).await);
        }

        SessionLogger::log_safety_flags(&session.id.to_string(), session.pain_flags.len(), false);
        Err(AppError::safety_gate(session.pain_flags.len()))
    }

    /// Continue past raised flags at the user's explicit request
    ///
    /// # Errors
    ///
    /// `InvalidState` outside the safety step.
    pub async fn override_safety(&self, session: &mut WizardSession) -> AppResult<PlanOutcome> {
        Self::require_state(session, WizardState::SafetyCheck, "override the safety check")?;
        session.safety_override = true;
        SessionLogger::log_safety_flags(&session.id.to_string(), session.pain_flags.len(), true);
        Ok(self.enter_exercise_plan(session).await)
    }

    // ========================================================================
    // Exercise plan
    // ========================================================================

    /// Replace the plan with a fresh suggestion
    ///
    /// # Errors
    ///
    /// `InvalidState` outside the exercise step or once any exercise is rated.
    pub async fn regenerate_plan(
        &self,
        session: &mut WizardSession,
        feedback_text: Option<&str>,
    ) -> AppResult<PlanOutcome> {
        Self::require_state(session, WizardState::ExercisePlan, "regenerate the plan")?;
        if !session.feedback.is_empty() {
            return Err(AppError::new(
                ErrorCode::InvalidState,
                "The plan cannot be regenerated after exercises have been rated",
            ));
        }
        Ok(self.generate_plan(session, feedback_text, true).await)
    }

    /// Rate the current exercise and move to the next one
    ///
    /// # Errors
    ///
    /// `InvalidState` outside the exercise step, `PlanGenerationEmpty` with no
    /// plan, `InvalidInput` when every exercise is already rated.
    pub fn record_feedback(
        &self,
        session: &mut WizardSession,
        pain_increased: bool,
        difficulty: Difficulty,
    ) -> AppResult<FeedbackProgress> {
        Self::require_state(session, WizardState::ExercisePlan, "rate an exercise")?;
        if session.plan.is_empty() {
            return Err(AppError::plan_generation_empty());
        }
        let exercise = session
            .current_exercise()
            .map(str::to_owned)
            .ok_or_else(|| AppError::invalid_input("Every exercise in the plan has already been rated"))?;

        debug!(
            index = session.exercise_index(),
            pain_increased,
            difficulty = %difficulty,
            "Exercise rated"
        );
        session.feedback.push(ExerciseFeedback {
            exercise,
            pain_increased,
            difficulty,
        });

        Ok(FeedbackProgress {
            rated: session.feedback.len(),
            total: session.plan.len(),
            next_exercise: session.current_exercise().map(str::to_owned),
        })
    }

    /// Leave the exercise step once every exercise is rated
    ///
    /// # Errors
    ///
    /// `InvalidState` outside the exercise step, `PlanGenerationEmpty` with no
    /// plan, `ExercisesIncomplete` while ratings are missing.
    pub fn complete_exercise_session(&self, session: &mut WizardSession) -> AppResult<Transition> {
        Self::require_state(session, WizardState::ExercisePlan, "finish the exercise session")?;
        if session.plan.is_empty() {
            return Err(AppError::plan_generation_empty());
        }
        let remaining = session.plan.len().saturating_sub(session.feedback.len());
        if remaining > 0 {
            return Err(AppError::new(
                ErrorCode::ExercisesIncomplete,
                format!("Please rate the remaining {remaining} exercise(s) before continuing"),
            ));
        }
        Ok(Self::advance(session))
    }

    // ========================================================================
    // Post session
    // ========================================================================

    /// Capture post-session pain, derive the next plan, and record the session
    ///
    /// A failed next-plan suggestion is recorded as an empty next plan.
    ///
    /// # Errors
    ///
    /// `InvalidState` outside the post-session step, `ValueOutOfRange` for
    /// pain above 10.
    pub async fn finish_session(
        &self,
        session: &mut WizardSession,
        post_pain: u8,
        pain_response: &str,
    ) -> AppResult<SessionRecord> {
        Self::require_state(session, WizardState::PostSession, "finish the session")?;
        let post_session_pain = PainLevel::new(post_pain)?;
        let profile = Self::session_profile(session)?.clone();

        let adjustment = compute_plan_adjustment(&session.feedback);
        let request = PlanRequest::new(profile.clone(), session.aggregate.clone())
            .with_feedback(Some(pain_response))
            .with_adjustment(&adjustment);
        let next_plan = match self.suggest_with_timeout(&request).await {
            Ok(plan) => plan,
            Err(error) => {
                warn!(error = %error, "Next plan suggestion failed, recording empty plan");
                ExercisePlan::default()
            }
        };

        let record = SessionRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            profile,
            assessment: std::mem::take(&mut session.aggregate),
            post_session_pain,
            pain_response: pain_response.trim().to_owned(),
            plan: std::mem::take(&mut session.plan),
            feedback: std::mem::take(&mut session.feedback),
            adjustment,
            next_plan,
        };

        session.history.append(record.clone());
        SessionLogger::log_session_recorded(
            &session.id.to_string(),
            &record.id.to_string(),
            session.history.len(),
        );

        let transition = Self::advance(session);
        session.reset_transient();
        session.state = transition.to;
        Ok(record)
    }

    /// Start a new cycle from the summary; history is kept
    ///
    /// # Errors
    ///
    /// `InvalidState` outside the summary step.
    pub fn restart(&self, session: &mut WizardSession) -> AppResult<Transition> {
        Self::require_state(session, WizardState::SessionEnd, "restart")?;
        let transition = Self::advance(session);
        session.reset_transient();
        Ok(transition)
    }

    /// Drop the current cycle from any step; history is kept
    pub fn abandon(&self, session: &mut WizardSession) {
        let from = session.state;
        info!(session.id = %session.id, from = from.as_str(), "Session abandoned");
        session.reset_transient();
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn require_state(session: &WizardSession, expected: WizardState, operation: &str) -> AppResult<()> {
        if session.state == expected {
            Ok(())
        } else {
            Err(AppError::invalid_state(operation, session.state))
        }
    }

    fn session_profile(session: &WizardSession) -> AppResult<&UserProfile> {
        session
            .profile
            .as_ref()
            .ok_or_else(|| AppError::internal("No profile recorded for this session"))
    }

    fn advance(session: &mut WizardSession) -> Transition {
        let from = session.state;
        let to = from.next();
        session.state = to;
        SessionLogger::log_transition(&session.id.to_string(), from.as_str(), to.as_str());
        Transition { from, to }
    }

    fn fold(session: &mut WizardSession, result: &MovementResult, kind: MovementKind) {
        session.aggregate = fold_movement_result(&session.aggregate, result, kind);
        session.performed.insert(kind);
    }

    fn raise_flag(session: &mut WizardSession, flag: &str) {
        if !session.pain_flags.iter().any(|existing| existing == flag) {
            session.pain_flags.push(flag.to_owned());
        }
    }

    async fn enter_exercise_plan(&self, session: &mut WizardSession) -> PlanOutcome {
        Self::advance(session);
        self.generate_plan(session, None, false).await
    }

    async fn generate_plan(
        &self,
        session: &mut WizardSession,
        feedback_text: Option<&str>,
        regenerated: bool,
    ) -> PlanOutcome {
        let plan = match Self::session_profile(session) {
            Ok(profile) => {
                let request = PlanRequest::new(profile.clone(), session.aggregate.clone())
                    .with_feedback(feedback_text);
                self.suggest_with_timeout(&request).await
            }
            Err(error) => Err(error),
        };

        session.feedback.clear();
        match plan {
            Ok(plan) if !plan.is_empty() => {
                SessionLogger::log_plan_generated(&session.id.to_string(), plan.len(), regenerated);
                let exercises = plan.len();
                session.plan = plan;
                PlanOutcome::Ready { exercises }
            }
            Ok(_) => {
                warn!("Exercise suggestion returned no usable lines");
                session.plan = ExercisePlan::default();
                PlanOutcome::Empty {
                    message: AppError::plan_generation_empty().message,
                }
            }
            Err(error) => {
                warn!(error = %error, "Exercise suggestion failed");
                session.plan = ExercisePlan::default();
                PlanOutcome::Empty {
                    message: AppError::plan_generation_empty().message,
                }
            }
        }
    }

    async fn analyze_with_timeout(
        &self,
        video: &VideoClip,
        kind: MovementKind,
        variant: Option<&str>,
    ) -> Result<MovementResult, AnalysisError> {
        timeout(
            self.limits.service_timeout(),
            self.service.analyze_movement(video, kind, variant),
        )
        .await
        .unwrap_or_else(|_| Err(AnalysisError::Timeout(self.limits.service_timeout_secs)))
    }

    async fn suggest_with_timeout(&self, request: &PlanRequest) -> AppResult<ExercisePlan> {
        timeout(self.limits.service_timeout(), self.service.suggest_plan(request))
            .await
            .unwrap_or_else(|_| {
                Err(AppError::external_unavailable(
                    self.service.name(),
                    format!("no answer within {}s", self.limits.service_timeout_secs),
                ))
            })
    }
}
