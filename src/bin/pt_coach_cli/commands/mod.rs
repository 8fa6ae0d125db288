// ABOUTME: Command modules for pt-coach plus shared coaching service selection
// ABOUTME: Falls back to the deterministic demo service when no provider is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

pub mod analyze;
pub mod checklist;
pub mod run;

use std::time::Duration;

use pt_coach::config::LlmProviderType;
use pt_coach::errors::AppError;
use pt_coach::llm::ChatProvider;
use pt_coach::services::{CoachingService, DemoCoachingService, LlmCoachingService};
use tokio::time::timeout;
use tracing::warn;

/// Pick the coaching service for this run
///
/// The configured provider must build and pass a health check within
/// `check_timeout`; otherwise the demo service is used.
async fn build_service(
    offline: bool,
    provider_type: LlmProviderType,
    check_timeout: Duration,
) -> Box<dyn CoachingService> {
    if offline {
        return Box::new(DemoCoachingService);
    }
    let service = match ChatProvider::for_type(provider_type) {
        Ok(provider) => LlmCoachingService::new(provider),
        Err(error) => return demo_fallback(provider_type, &error),
    };
    match timeout(check_timeout, service.check_provider()).await {
        Ok(Ok(())) => Box::new(service),
        Ok(Err(error)) => demo_fallback(provider_type, &error),
        Err(_) => demo_fallback(
            provider_type,
            &AppError::external_unavailable(provider_type.to_string(), "health check timed out"),
        ),
    }
}

fn demo_fallback(provider_type: LlmProviderType, error: &AppError) -> Box<dyn CoachingService> {
    warn!(error = %error, provider = %provider_type, "LLM provider unavailable, using demo service");
    println!("{}", error.user_message());
    println!("Continuing with built-in demo coaching (results are illustrative only).");
    Box::new(DemoCoachingService)
}
