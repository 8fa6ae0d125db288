// ABOUTME: Google Gemini LLM provider with inline video input for movement analysis
// ABOUTME: Calls the Generative Language generateContent endpoint over reqwest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. `PT_COACH_LLM_MODEL` overrides the default model.
//!
//! Media attachments are sent as `inline_data` parts, base64-encoded. The
//! API caps a single request at 20 MB, so oversized payloads are rejected
//! before sending.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pt_coach::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
//! use pt_coach::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = GeminiProvider::from_env()?;
//!     let request = ChatRequest::new(vec![ChatMessage::user("Name three hip stretches.")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole, TokenUsage};
use crate::config::LlmProviderType;
use crate::errors::{AppError, ErrorCode};

/// Environment variable for Gemini API key
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default model to use
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const SERVICE_NAME: &str = "Gemini";

/// Request size cap for `inline_data` uploads
const INLINE_REQUEST_LIMIT_BYTES: usize = 20_000_000;

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

/// Part of content: text or inline media
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData", alias = "inline_data")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType", alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    default_model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            default_model: DEFAULT_MODEL.to_owned(),
        }
    }

    /// Create a provider from `GEMINI_API_KEY`, honouring the model override
    ///
    /// # Errors
    ///
    /// Returns a `ConfigMissing` error if the API key is not set.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var(GEMINI_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::config_missing(format!("{GEMINI_API_KEY_ENV} environment variable not set"))
            })?;
        let provider = Self::new(api_key);
        Ok(match LlmProviderType::model_from_env() {
            Some(model) => provider.with_default_model(model),
            None => provider,
        })
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    const fn convert_role(role: MessageRole) -> &'static str {
        match role {
            MessageRole::System | MessageRole::User => "user",
            MessageRole::Assistant => "model",
        }
    }

    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{API_BASE_URL}/models/{model}:{method}?key={}", self.api_key)
    }

    /// Text first, then each attachment as an inline part
    fn message_parts(message: &ChatMessage) -> Vec<ContentPart> {
        let mut parts = Vec::with_capacity(1 + message.attachments.len());
        if !message.content.is_empty() {
            parts.push(ContentPart::Text {
                text: message.content.clone(),
            });
        }
        parts.extend(message.attachments.iter().map(|attachment| ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: attachment.mime_type.clone(),
                data: BASE64.encode(&attachment.data),
            },
        }));
        parts
    }

    fn convert_messages(messages: &[ChatMessage]) -> (Vec<GeminiContent>, Option<GeminiContent>) {
        let mut contents = Vec::new();
        let mut system_instruction = None;

        for message in messages {
            if message.role == MessageRole::System {
                system_instruction = Some(GeminiContent {
                    role: None,
                    parts: vec![ContentPart::Text {
                        text: message.content.clone(),
                    }],
                });
            } else {
                contents.push(GeminiContent {
                    role: Some(Self::convert_role(message.role).to_owned()),
                    parts: Self::message_parts(message),
                });
            }
        }

        (contents, system_instruction)
    }

    /// Size of all attachments once base64-encoded
    fn inline_payload_len(request: &ChatRequest) -> usize {
        request
            .messages
            .iter()
            .flat_map(|message| &message.attachments)
            .map(|attachment| base64::encoded_len(attachment.data.len(), true).unwrap_or(usize::MAX))
            .fold(0, usize::saturating_add)
    }

    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        let (contents, system_instruction) = Self::convert_messages(&request.messages);

        let response_mime_type = request.json_response.then_some("application/json");
        let generation_config = if request.temperature.is_some()
            || request.max_tokens.is_some()
            || response_mime_type.is_some()
        {
            Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                response_mime_type,
            })
        } else {
            None
        };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    /// Concatenate every text part of the first candidate
    fn extract_content(response: &GeminiResponse) -> Result<String, AppError> {
        let content = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .ok_or_else(|| AppError::external_service(SERVICE_NAME, "No content in response"))?;

        let text: String = content
            .parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                ContentPart::InlineData { .. } => None,
            })
            .collect();

        if text.is_empty() {
            return Err(AppError::external_service(SERVICE_NAME, "Response contained no text"));
        }
        Ok(text)
    }

    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map API error status to an error code
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("Gemini rejected the API key: {message}"),
            ),
            429 => AppError::new(ErrorCode::ExternalRateLimited, Self::extract_quota_message(&message)),
            _ => AppError::external_service(SERVICE_NAME, format!("API error ({status}): {message}")),
        }
    }

    /// Turn "Please retry in 6.4s" into a whole-second retry hint
    fn extract_quota_message(message: &str) -> String {
        const RETRY_PREFIX: &str = "Please retry in ";
        if let Some(retry_pos) = message.find(RETRY_PREFIX) {
            let after_prefix = &message[retry_pos + RETRY_PREFIX.len()..];
            if let Some(s_pos) = after_prefix.find('s') {
                if let Ok(seconds) = after_prefix[..s_pos].parse::<f64>() {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let seconds_int = seconds.ceil() as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::full_featured()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let inline_len = Self::inline_payload_len(request);
        if inline_len > INLINE_REQUEST_LIMIT_BYTES {
            return Err(AppError::invalid_input(format!(
                "Encoded media is {inline_len} bytes, over the {INLINE_REQUEST_LIMIT_BYTES} byte inline limit"
            )));
        }

        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model, "generateContent");
        let gemini_request = Self::build_gemini_request(request);

        debug!(attachments = request.has_attachments(), "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE_NAME, format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE_NAME, format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response");
            AppError::external_service(SERVICE_NAME, format!("Failed to parse response: {e}"))
        })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service(SERVICE_NAME, error.message));
        }

        let content = Self::extract_content(&gemini_response)?;
        let usage = gemini_response.usage_metadata.as_ref().map(Self::convert_usage);
        let finish_reason = gemini_response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.clone());

        debug!("Received Gemini response");

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
            usage,
            finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let url = format!("{API_BASE_URL}/models?key={}", self.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE_NAME, format!("Health check failed: {e}")))?;

        Ok(response.status().is_success())
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::defaults::MAX_VIDEO_BYTES;

    #[test]
    fn test_largest_accepted_video_fits_inline_limit() {
        let encoded = base64::encoded_len(MAX_VIDEO_BYTES, true).unwrap();
        assert!(encoded < INLINE_REQUEST_LIMIT_BYTES);
    }

    #[tokio::test]
    async fn test_oversized_inline_payload_is_rejected_before_sending() {
        let provider = GeminiProvider::new("test-key");
        let request = ChatRequest::new(vec![
            ChatMessage::user("walking").with_attachment("video/mp4", vec![0; 15_000_001]),
        ]);
        assert!(GeminiProvider::inline_payload_len(&request) > INLINE_REQUEST_LIMIT_BYTES);

        let error = provider.complete(&request).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_video_attachment_becomes_inline_data() {
        let request = ChatRequest::new(vec![
            ChatMessage::system("Analyze"),
            ChatMessage::user("walking").with_attachment("video/mp4", vec![0, 1, 2]),
        ]);
        let body = serde_json::to_value(GeminiProvider::build_gemini_request(&request)).unwrap();

        assert_eq!(body["system_instruction"]["parts"][0]["text"], "Analyze");
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "walking");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "video/mp4");
        assert_eq!(parts[1]["inlineData"]["data"], "AAEC");
    }

    #[test]
    fn test_json_response_sets_mime_type() {
        let request = ChatRequest::new(vec![ChatMessage::user("x")]).with_json_response();
        let body = serde_json::to_value(GeminiProvider::build_gemini_request(&request)).unwrap();
        assert_eq!(body["generation_config"]["responseMimeType"], "application/json");
    }

    #[test]
    fn test_quota_message_rounds_up_seconds() {
        let message = GeminiProvider::extract_quota_message("Quota hit. Please retry in 6.4s.");
        assert_eq!(message, "AI service quota exceeded. Please try again in 7 seconds.");
    }

    #[test]
    fn test_auth_status_maps_to_auth_failed() {
        let error = GeminiProvider::map_api_error(403, r#"{"error":{"message":"bad key"}}"#);
        assert_eq!(error.code, ErrorCode::ExternalAuthFailed);
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", GeminiProvider::new("secret-key"));
        assert!(!rendered.contains("secret-key"));
    }
}
