// ABOUTME: OpenAI chat-completions provider for workout generation
// ABOUTME: One request per call, no retries, errors classified into RemoteErrorKind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

//! # OpenAI Provider
//!
//! Implementation of the [`LlmProvider`] trait against the OpenAI
//! chat-completions API.
//!
//! ## Configuration
//!
//! Set the `OPENAI_API_KEY` environment variable. `FITGPT_LLM_MODEL` and
//! `FITGPT_LLM_BASE_URL` override the model and endpoint (the latter is
//! how tests and OpenAI-compatible gateways point elsewhere).
//!
//! ## Error classification
//!
//! Provider failures are mapped into [`RemoteErrorKind`] buckets by status
//! code and error body. The mapping matters downstream: quota exhaustion
//! is the one kind the orchestrator recovers from, so quota/billing
//! signals must never be folded into the generic rate-limit bucket.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::errors::{GenerationError, GenerationResult, RemoteErrorKind};

/// Environment variable for the OpenAI API key
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the model
pub const MODEL_ENV: &str = "FITGPT_LLM_MODEL";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "FITGPT_LLM_BASE_URL";

/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_ENV: &str = "FITGPT_LLM_TIMEOUT_SECS";

/// Default model to use
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Base URL for the OpenAI API
const API_BASE_URL: &str = "https://api.openai.com/v1";

/// Request timeout - the LLM call dominates request latency and an
/// unbounded wait is unacceptable on a request/response path
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// OpenAI API error envelope
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAiProvider {
    /// Create a new provider with the given API key
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: API_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a provider from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Unconfigured`] if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> GenerationResult<Self> {
        let api_key = std::env::var(OPENAI_API_KEY_ENV).map_err(|_| {
            GenerationError::unconfigured(format!(
                "missing {OPENAI_API_KEY_ENV} environment variable"
            ))
        })?;

        let mut provider = Self::new(api_key);
        if let Ok(model) = std::env::var(MODEL_ENV) {
            provider = provider.with_model(model);
        }
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            provider = provider.with_base_url(base_url);
        }
        if let Some(secs) = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            provider = provider.with_timeout(Duration::from_secs(secs));
        }
        Ok(provider)
    }

    /// Override the default model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url.trim_end_matches('/'))
    }

    fn convert_messages(messages: &[ChatMessage]) -> Vec<OpenAiMessage> {
        messages.iter().map(OpenAiMessage::from).collect()
    }

    /// Classify an API-level error into a [`RemoteErrorKind`]
    ///
    /// Quota/billing signals win over the 429 status: OpenAI reports
    /// exhausted credit as `insufficient_quota` with status 429, and that
    /// case must surface as `QuotaExceeded`, not `RateLimited`.
    fn classify_api_error(
        status: reqwest::StatusCode,
        code: Option<&str>,
        error_type: Option<&str>,
        message: &str,
    ) -> RemoteErrorKind {
        let lowered = message.to_lowercase();
        let tagged = |needle: &str| {
            code == Some(needle) || error_type == Some(needle)
        };

        if tagged("insufficient_quota")
            || lowered.contains("quota")
            || lowered.contains("billing")
            || lowered.contains("credits")
        {
            RemoteErrorKind::QuotaExceeded
        } else if status.as_u16() == 429 || tagged("rate_limit_exceeded") {
            RemoteErrorKind::RateLimited
        } else if status.as_u16() == 401 || tagged("invalid_api_key") || lowered.contains("api key")
        {
            RemoteErrorKind::AuthInvalid
        } else {
            RemoteErrorKind::Unknown
        }
    }

    /// Parse an error response body from the API
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> GenerationError {
        if let Ok(envelope) = serde_json::from_str::<OpenAiErrorResponse>(body) {
            let kind = Self::classify_api_error(
                status,
                envelope.error.code.as_deref(),
                envelope.error.error_type.as_deref(),
                &envelope.error.message,
            );
            warn!(
                kind = %kind,
                status = status.as_u16(),
                "OpenAI API error: {}",
                envelope.error.message
            );
            GenerationError::remote(kind, envelope.error.message)
        } else {
            let kind = Self::classify_api_error(status, None, None, body);
            GenerationError::remote(
                kind,
                format!(
                    "API error ({}): {}",
                    status,
                    body.chars().take(200).collect::<String>()
                ),
            )
        }
    }

    /// Classify a transport-level reqwest failure
    fn transport_error(e: &reqwest::Error) -> GenerationError {
        if e.is_connect() || e.is_timeout() {
            GenerationError::unreachable(format!("failed to reach OpenAI API: {e}"))
        } else {
            GenerationError::remote(
                RemoteErrorKind::Unknown,
                format!("transport error calling OpenAI API: {e}"),
            )
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn display_name(&self) -> &'static str {
        "OpenAI"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.model)))]
    async fn complete(&self, request: &ChatRequest) -> GenerationResult<ChatResponse> {
        let model = request.model.as_deref().unwrap_or(&self.model);

        debug!("Sending chat completion request to OpenAI");

        let api_request = OpenAiRequest {
            model: model.to_owned(),
            messages: Self::convert_messages(&request.messages),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_output.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to OpenAI API: {}", e);
                Self::transport_error(&e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read OpenAI API response: {}", e);
            Self::transport_error(&e)
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let api_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse OpenAI API response: {}", e);
            GenerationError::remote(
                RemoteErrorKind::Unknown,
                format!("failed to parse response: {e}"),
            )
        })?;

        let choice = api_response.choices.into_iter().next().ok_or_else(|| {
            GenerationError::remote(RemoteErrorKind::Unknown, "API returned no choices")
        })?;

        let content = choice.message.content.unwrap_or_default();

        debug!(
            "Received response from OpenAI: {} chars, finish_reason: {:?}",
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: api_response.model,
            usage: api_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(status: u16, code: Option<&str>, message: &str) -> RemoteErrorKind {
        OpenAiProvider::classify_api_error(
            reqwest::StatusCode::from_u16(status).unwrap(),
            code,
            None,
            message,
        )
    }

    #[test]
    fn test_insufficient_quota_beats_rate_limit_status() {
        // OpenAI reports exhausted billing as a 429 with code insufficient_quota
        assert_eq!(
            classify(
                429,
                Some("insufficient_quota"),
                "You exceeded your current quota, please check your plan and billing details."
            ),
            RemoteErrorKind::QuotaExceeded
        );
    }

    #[test]
    fn test_quota_phrases_classify_as_quota() {
        assert_eq!(
            classify(400, None, "Billing hard limit has been reached"),
            RemoteErrorKind::QuotaExceeded
        );
        assert_eq!(
            classify(500, None, "You have run out of credits"),
            RemoteErrorKind::QuotaExceeded
        );
    }

    #[test]
    fn test_plain_429_is_rate_limited() {
        assert_eq!(
            classify(429, Some("rate_limit_exceeded"), "Too many requests"),
            RemoteErrorKind::RateLimited
        );
        assert_eq!(classify(429, None, "Slow down"), RemoteErrorKind::RateLimited);
    }

    #[test]
    fn test_auth_classification() {
        assert_eq!(
            classify(401, Some("invalid_api_key"), "Incorrect API key provided"),
            RemoteErrorKind::AuthInvalid
        );
        assert_eq!(
            classify(403, None, "Invalid API key"),
            RemoteErrorKind::AuthInvalid
        );
    }

    #[test]
    fn test_unrecognized_errors_are_unknown() {
        assert_eq!(
            classify(500, None, "The server had an error"),
            RemoteErrorKind::Unknown
        );
    }

    #[test]
    fn test_error_body_parsing() {
        let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#;
        let err = OpenAiProvider::parse_error_response(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            body,
        );
        assert_eq!(err.remote_kind(), Some(RemoteErrorKind::QuotaExceeded));
    }

    #[test]
    fn test_unparseable_error_body_falls_back_to_status() {
        let err =
            OpenAiProvider::parse_error_response(reqwest::StatusCode::UNAUTHORIZED, "nope");
        assert_eq!(err.remote_kind(), Some(RemoteErrorKind::AuthInvalid));
    }
}
