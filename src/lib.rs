// ABOUTME: Main library entry point for the PT Coach self-assessment wizard
// ABOUTME: Wires intake, movement analysis, safety gating, exercise plans, and session history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # PT Coach
//!
//! A guided physical-therapy self-assessment. A user fills in an intake
//! form, uploads short videos of walking, squatting, and balance movements,
//! answers a red-flag checklist, performs a suggested exercise plan, rates
//! each exercise, and reports how they feel afterwards. Every completed
//! cycle is appended to an in-memory history that shapes the next plan.
//!
//! ## Architecture
//!
//! - **Wizard**: the six-step session state machine ([`wizard::SessionWizard`])
//! - **Intelligence**: pure folding of analyses and feedback (`pt-coach-intelligence`)
//! - **Services**: the coaching boundary, LLM-backed or deterministic demo
//! - **LLM**: Gemini (vision) and OpenAI-compatible local providers
//! - **Config**: intake rules, wizard limits, and provider selection from env
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pt_coach::config::CoachConfig;
//! use pt_coach::services::DemoCoachingService;
//! use pt_coach::wizard::{SessionWizard, WizardSession};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = CoachConfig::from_env()?;
//! let wizard = SessionWizard::new(config.intake, config.wizard, DemoCoachingService);
//! let session = WizardSession::new();
//! println!("Starting at {}", session.state());
//! # let _ = wizard;
//! # Ok(())
//! # }
//! ```

pub use pt_coach_core::{constants, errors, models};
pub use pt_coach_intelligence as intelligence;

/// Configuration loaded from the environment
pub mod config;

/// Append-only record of completed sessions
pub mod history;

/// LLM provider abstraction and implementations
pub mod llm;

/// Structured logging setup and session event helpers
pub mod logging;

/// Coaching service boundary and implementations
pub mod services;

/// Session wizard state machine
pub mod wizard;
