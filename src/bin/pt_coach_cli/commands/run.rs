// ABOUTME: Interactive wizard loop driving one user through repeated assessment cycles
// ABOUTME: Maps each wizard step to stdin prompts; recoverable errors re-prompt in place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use pt_coach::config::{CoachConfig, IntakeConfig};
use pt_coach::constants::checklists::{PAIN_AREAS, RED_FLAG_QUESTIONS};
use pt_coach::constants::messages::REASSESSMENT_DUE;
use pt_coach::constants::pain::{MAX_PAIN, MIN_PAIN};
use pt_coach::errors::{AppError, ErrorCode};
use pt_coach::models::{ComplaintType, Difficulty, MovementKind};
use pt_coach::services::{CoachingService, VideoClip};
use pt_coach::wizard::{IntakeForm, SafetyAnswers, SessionWizard, WizardSession, WizardState};
use tracing::info;

use super::build_service;
use crate::helpers::display::{
    display_assessment, display_disclaimer, display_movement_outcome, display_plan,
    display_plan_outcome, display_profile, display_progress, display_record, display_step,
};
use crate::helpers::input::Prompter;

/// Run the interactive wizard until the user stops
pub async fn run(offline: bool, strict: bool, export: Option<PathBuf>) -> Result<()> {
    let mut config = CoachConfig::from_env()?;
    if strict {
        config.intake = IntakeConfig::strict();
    }
    let service = build_service(offline, config.llm_provider, config.wizard.service_timeout()).await;
    info!(service = service.name(), "Wizard starting");

    let wizard = SessionWizard::new(config.intake, config.wizard, service);
    let mut session = WizardSession::new();
    let mut prompter = Prompter::new();

    let outcome = drive(&wizard, &mut session, &mut prompter).await;

    if let Some(path) = export {
        tokio::fs::write(&path, session.history().to_json()?).await?;
        println!("History written to {}", path.display());
    }
    outcome
}

async fn drive<S: CoachingService>(
    wizard: &SessionWizard<S>,
    session: &mut WizardSession,
    prompter: &mut Prompter,
) -> Result<()> {
    let mut shown = None;
    loop {
        if shown != Some(session.state()) {
            display_step(session.state());
            shown = Some(session.state());
        }
        match session.state() {
            WizardState::Intake => intake_step(wizard, session, prompter).await?,
            WizardState::MovementScreens => movement_step(wizard, session, prompter).await?,
            WizardState::SafetyCheck => safety_step(wizard, session, prompter).await?,
            WizardState::ExercisePlan => exercise_step(wizard, session, prompter).await?,
            WizardState::PostSession => post_session_step(wizard, session, prompter).await?,
            WizardState::SessionEnd => {
                if let Some(summary) = session.history().progress_summary() {
                    display_progress(&summary);
                }
                display_disclaimer();
                if !prompter.confirm("\nStart another session?", false).await? {
                    return Ok(());
                }
                wizard.restart(session)?;
                shown = None;
            }
        }
    }
}

fn report(error: &AppError) {
    println!("\n{}", error.user_message());
}

// ============================================================================
// Steps
// ============================================================================

async fn intake_step<S: CoachingService>(
    wizard: &SessionWizard<S>,
    session: &mut WizardSession,
    prompter: &mut Prompter,
) -> Result<()> {
    if wizard.reassessment_due(session, Utc::now()) {
        println!("{REASSESSMENT_DUE}");
        if prompter.confirm("Reassess with your previous details?", true).await? {
            wizard.start_reassessment(session, Utc::now())?;
            if let Some(profile) = session.profile() {
                display_profile(profile);
            }
            return Ok(());
        }
    }

    let config = wizard.intake_config();
    let name_prompt = if config.require_name {
        "First name:"
    } else {
        "First name (optional):"
    };
    let first_name = prompter.ask_optional(name_prompt).await?;
    let gender = config.gender_options[prompter.choose("Gender:", &config.gender_options).await?];
    let age = prompter
        .ask_parsed(&format!("Age ({}-{}):", config.min_age, config.max_age))
        .await?;
    let baseline_pain = prompter
        .ask_parsed(&format!("Current pain ({MIN_PAIN} none - {MAX_PAIN} worst):"))
        .await?;
    let complaint_types = [ComplaintType::Pain, ComplaintType::Balance, ComplaintType::Other];
    let chief_complaint_type =
        complaint_types[prompter.choose("Main reason for today:", &complaint_types).await?];
    let complaint = prompter.ask("Describe it briefly:").await?;
    let override_seated = prompter
        .confirm("Prefer standing exercises even if seated ones are suggested?", false)
        .await?;

    let form = IntakeForm {
        first_name,
        gender,
        age,
        baseline_pain,
        chief_complaint_type,
        complaint,
        override_seated,
    };
    match wizard.submit_intake(session, &form) {
        Ok(_) => {
            if let Some(profile) = session.profile() {
                display_profile(profile);
            }
        }
        Err(error) => report(&error),
    }
    Ok(())
}

async fn movement_step<S: CoachingService>(
    wizard: &SessionWizard<S>,
    session: &mut WizardSession,
    prompter: &mut Prompter,
) -> Result<()> {
    println!();
    display_assessment(session);

    let mut options: Vec<String> = MovementKind::ALL
        .iter()
        .map(|kind| format!("Upload {kind} video"))
        .collect();
    options.push("Continue to safety check".to_owned());
    options.push("Abandon session".to_owned());

    let choice = prompter.choose("What next?", &options).await?;
    if let Some(&kind) = MovementKind::ALL.get(choice) {
        let path: PathBuf = prompter.ask_parsed("Path to video file:").await?;
        let clip = match VideoClip::from_path(&path, wizard.limits().max_video_bytes).await {
            Ok(clip) => clip,
            Err(error) => {
                report(&error);
                return Ok(());
            }
        };
        println!("Analyzing {kind}...");
        match wizard.assess_movement(session, &clip, kind).await {
            Ok(outcome) => display_movement_outcome(&outcome),
            Err(error) => report(&error),
        }
    } else if choice == MovementKind::ALL.len() {
        if let Err(error) = wizard.complete_movement_screens(session) {
            report(&error);
        }
    } else {
        wizard.abandon(session);
    }
    Ok(())
}

async fn safety_step<S: CoachingService>(
    wizard: &SessionWizard<S>,
    session: &mut WizardSession,
    prompter: &mut Prompter,
) -> Result<()> {
    let mut answers = SafetyAnswers::none();
    println!("Do any of these apply to you right now?");
    for (index, question) in RED_FLAG_QUESTIONS.iter().enumerate() {
        if prompter.confirm(question, false).await? {
            answers = answers.with_red_flag(index);
        }
    }
    for index in prompter
        .choose_many("Where do you feel pain?", PAIN_AREAS)
        .await?
    {
        answers = answers.with_pain_area(PAIN_AREAS[index]);
    }

    println!("Preparing your exercise plan...");
    match wizard.submit_safety_check(session, &answers).await {
        Ok(outcome) => display_plan_outcome(&outcome, session),
        Err(error) if error.code == ErrorCode::SafetyGate => {
            report(&error);
            for flag in session.pain_flags() {
                println!("   - {flag}");
            }
            if prompter
                .confirm("Continue anyway with gentler exercises?", false)
                .await?
            {
                let outcome = wizard.override_safety(session).await?;
                display_plan_outcome(&outcome, session);
            } else {
                println!("Please check in with a healthcare professional before exercising.");
                wizard.abandon(session);
            }
        }
        Err(error) => report(&error),
    }
    Ok(())
}

async fn exercise_step<S: CoachingService>(
    wizard: &SessionWizard<S>,
    session: &mut WizardSession,
    prompter: &mut Prompter,
) -> Result<()> {
    if session.plan().is_empty() {
        let options = ["Regenerate the plan", "Abandon session"];
        if prompter.choose("No plan is available.", &options).await? == 0 {
            let outcome = wizard.regenerate_plan(session, None).await?;
            display_plan_outcome(&outcome, session);
        } else {
            wizard.abandon(session);
        }
        return Ok(());
    }

    if session.feedback().is_empty()
        && prompter
            .confirm("Would you like a different plan first?", false)
            .await?
    {
        let wish = prompter
            .ask_optional("Anything to change (optional):")
            .await?;
        println!("Regenerating...");
        let outcome = wizard.regenerate_plan(session, wish.as_deref()).await?;
        display_plan_outcome(&outcome, session);
        return Ok(());
    }

    if let Some(exercise) = session.current_exercise().map(str::to_owned) {
        println!(
            "\nExercise {} of {}: {exercise}",
            session.exercise_index() + 1,
            session.plan().len()
        );
        prompter.ask("Press Enter when done.").await?;
        let pain_increased = prompter.confirm("Did your pain increase?", false).await?;
        let levels = [Difficulty::Easy, Difficulty::JustRight, Difficulty::Hard];
        let difficulty = levels[prompter.choose("How did it feel?", &levels).await?];
        match wizard.record_feedback(session, pain_increased, difficulty) {
            Ok(progress) if progress.is_complete() => display_plan(session),
            Ok(_) => {}
            Err(error) => report(&error),
        }
        return Ok(());
    }

    if let Err(error) = wizard.complete_exercise_session(session) {
        report(&error);
    }
    Ok(())
}

async fn post_session_step<S: CoachingService>(
    wizard: &SessionWizard<S>,
    session: &mut WizardSession,
    prompter: &mut Prompter,
) -> Result<()> {
    let post_pain = prompter
        .ask_parsed(&format!("Pain now ({MIN_PAIN}-{MAX_PAIN}):"))
        .await?;
    let response = prompter.ask("How do you feel after the session?").await?;
    println!("Saving and preparing your next plan...");
    match wizard.finish_session(session, post_pain, &response).await {
        Ok(record) => display_record(&record),
        Err(error) => report(&error),
    }
    Ok(())
}
