// ABOUTME: Unified LLM provider selector for runtime provider switching
// ABOUTME: Wraps Gemini or a local OpenAI-compatible endpoint based on environment configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

//! # LLM Provider Selector
//!
//! Set `PT_COACH_LLM_PROVIDER`:
//! - `gemini` (default): video analysis and exercise suggestions
//! - `local`: exercise suggestions only, via Ollama/vLLM/`LocalAI`
//!
//! ## Example
//!
//! ```rust,no_run
//! use pt_coach::llm::{ChatMessage, ChatProvider, ChatRequest, LlmProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pt_coach::errors::AppError> {
//!     let provider = ChatProvider::from_env()?;
//!     let request = ChatRequest::new(vec![ChatMessage::user("Hello!")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{ChatRequest, ChatResponse, GeminiProvider, LlmCapabilities, LlmProvider, OpenAiCompatibleProvider};
use crate::config::LlmProviderType;
use crate::errors::AppError;

/// Chat provider chosen at runtime
pub enum ChatProvider {
    /// Google Gemini, supports video input
    Gemini(GeminiProvider),
    /// Local LLM via `OpenAI`-compatible API, text only
    Local(OpenAiCompatibleProvider),
}

impl ChatProvider {
    /// Create a provider from environment configuration
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is missing for Gemini, or the
    /// local HTTP client cannot be built.
    pub fn from_env() -> Result<Self, AppError> {
        Self::for_type(LlmProviderType::from_env())
    }

    /// Create a provider of the given type from its environment variables
    ///
    /// # Errors
    ///
    /// See [`ChatProvider::from_env`].
    pub fn for_type(provider_type: LlmProviderType) -> Result<Self, AppError> {
        info!(
            "Initializing LLM provider: {} (set {} to change)",
            provider_type,
            LlmProviderType::ENV_VAR
        );

        let provider = match provider_type {
            LlmProviderType::Gemini => Self::Gemini(GeminiProvider::from_env()?),
            LlmProviderType::Local => Self::Local(OpenAiCompatibleProvider::from_env()?),
        };

        debug!(
            "Provider {} initialized with model: {}",
            provider.display_name(),
            provider.default_model()
        );
        Ok(provider)
    }

    /// Get the provider type
    #[must_use]
    pub const fn provider_type(&self) -> LlmProviderType {
        match self {
            Self::Gemini(_) => LlmProviderType::Gemini,
            Self::Local(_) => LlmProviderType::Local,
        }
    }
}

impl fmt::Debug for ChatProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini(p) => f.debug_tuple("ChatProvider::Gemini").field(p).finish(),
            Self::Local(_) => f.debug_tuple("ChatProvider::Local").finish(),
        }
    }
}

#[async_trait]
impl LlmProvider for ChatProvider {
    fn name(&self) -> &'static str {
        match self {
            Self::Gemini(p) => p.name(),
            Self::Local(p) => p.name(),
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini(p) => p.display_name(),
            Self::Local(p) => p.display_name(),
        }
    }

    fn capabilities(&self) -> LlmCapabilities {
        match self {
            Self::Gemini(p) => p.capabilities(),
            Self::Local(p) => p.capabilities(),
        }
    }

    fn default_model(&self) -> &str {
        match self {
            Self::Gemini(p) => p.default_model(),
            Self::Local(p) => p.default_model(),
        }
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        match self {
            Self::Gemini(p) => p.complete(request).await,
            Self::Local(p) => p.complete(request).await,
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        match self {
            Self::Gemini(p) => p.health_check().await,
            Self::Local(p) => p.health_check().await,
        }
    }
}
