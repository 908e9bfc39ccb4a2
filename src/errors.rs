// ABOUTME: Unified error types for the workout generation pipeline
// ABOUTME: Classifies remote LLM failures and response defects into a typed taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

//! # Error Handling
//!
//! Every failure the pipeline can produce is a [`GenerationError`]. Remote
//! failures carry a [`RemoteErrorKind`] so callers can render a specific
//! message for quota, rate-limit, and authentication problems; malformed
//! model output carries an [`InvalidResponseReason`].
//!
//! The one failure class that never reaches a caller is
//! [`RemoteErrorKind::QuotaExceeded`]: the orchestrator converts it into a
//! template-generated workout instead (see `generation::orchestrator`).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of failures from the remote LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteErrorKind {
    /// Billing quota exhausted - the only kind that triggers the template fallback
    QuotaExceeded,
    /// Too many requests in a window; retryable by the caller, never by us
    RateLimited,
    /// API key rejected by the provider
    AuthInvalid,
    /// Connection-level failure: DNS, TCP, TLS, or timeout
    Unreachable,
    /// Anything the provider reported that fits no other bucket
    Unknown,
}

impl RemoteErrorKind {
    /// Stable identifier used in logs and HTTP error bodies
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::QuotaExceeded => "quota_exceeded",
            Self::RateLimited => "rate_limited",
            Self::AuthInvalid => "auth_invalid",
            Self::Unreachable => "unreachable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a model response was rejected by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidResponseReason {
    /// No JSON object could be recovered from the raw text
    Unparseable,
    /// JSON parsed but the workout structure is incomplete
    SchemaViolation,
}

impl InvalidResponseReason {
    /// Stable identifier used in logs and HTTP error bodies
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unparseable => "unparseable",
            Self::SchemaViolation => "schema-violation",
        }
    }
}

impl fmt::Display for InvalidResponseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for workout generation
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// No LLM credential is available; fatal for the request, requires operator action
    #[error("generation service is not configured: {message}")]
    Unconfigured {
        /// What is missing and how to fix it
        message: String,
    },

    /// The remote LLM call failed
    #[error("remote generation failed ({kind}): {message}")]
    Remote {
        /// Failure classification
        kind: RemoteErrorKind,
        /// Provider-supplied or transport-level detail
        message: String,
    },

    /// The model responded but the response is unusable
    #[error("invalid model response ({reason}): {detail}")]
    InvalidResponse {
        /// Rejection classification
        reason: InvalidResponseReason,
        /// Human-readable explanation of the defect
        detail: String,
    },
}

impl GenerationError {
    /// Missing credential or endpoint configuration
    pub fn unconfigured(message: impl Into<String>) -> Self {
        Self::Unconfigured {
            message: message.into(),
        }
    }

    /// Remote failure with an explicit kind
    pub fn remote(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self::Remote {
            kind,
            message: message.into(),
        }
    }

    /// Billing quota exhausted
    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::remote(RemoteErrorKind::QuotaExceeded, message)
    }

    /// Provider rate limit hit
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::remote(RemoteErrorKind::RateLimited, message)
    }

    /// API key rejected
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::remote(RemoteErrorKind::AuthInvalid, message)
    }

    /// Transport-level failure
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::remote(RemoteErrorKind::Unreachable, message)
    }

    /// Raw text contained no recoverable JSON object
    pub fn unparseable(detail: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: InvalidResponseReason::Unparseable,
            detail: detail.into(),
        }
    }

    /// JSON parsed but the workout shape is incomplete
    pub fn schema_violation(detail: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: InvalidResponseReason::SchemaViolation,
            detail: detail.into(),
        }
    }

    /// The remote failure kind, when this error came from the provider
    #[must_use]
    pub const fn remote_kind(&self) -> Option<RemoteErrorKind> {
        match self {
            Self::Remote { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether the template fallback should replace this error
    ///
    /// Only billing exhaustion qualifies. A malformed-but-paid response
    /// indicates a prompt or model problem, not unavailability, so parse
    /// failures propagate.
    #[must_use]
    pub const fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            Self::Remote {
                kind: RemoteErrorKind::QuotaExceeded,
                ..
            }
        )
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Unconfigured { .. } => 503,
            Self::Remote { kind, .. } => match kind {
                RemoteErrorKind::QuotaExceeded | RemoteErrorKind::RateLimited => 429,
                RemoteErrorKind::AuthInvalid => 401,
                RemoteErrorKind::Unreachable => 502,
                RemoteErrorKind::Unknown => 500,
            },
            Self::InvalidResponse { .. } => 502,
        }
    }

    /// Stable machine-readable code for logs and HTTP error bodies
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unconfigured { .. } => "unconfigured",
            Self::Remote { kind, .. } => kind.as_str(),
            Self::InvalidResponse { reason, .. } => reason.as_str(),
        }
    }

    /// User-facing message, safe to display verbatim
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Unconfigured { .. } => {
                "The AI service is not configured. Set OPENAI_API_KEY and restart."
            }
            Self::Remote { kind, .. } => match kind {
                RemoteErrorKind::QuotaExceeded => {
                    "The AI service quota is exhausted. Please try again later."
                }
                RemoteErrorKind::RateLimited => "Too many requests. Wait a moment and try again.",
                RemoteErrorKind::AuthInvalid => "Authentication with the AI service failed.",
                RemoteErrorKind::Unreachable => {
                    "Could not reach the AI service. Try again in a few moments."
                }
                RemoteErrorKind::Unknown => "The AI service returned an unexpected error.",
            },
            Self::InvalidResponse { .. } => "The AI returned an invalid workout. Please try again.",
        }
    }
}

/// Result type alias for the generation pipeline
pub type GenerationResult<T> = Result<T, GenerationError>;

/// HTTP error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// User-facing message
    pub error: String,
    /// Internal detail, useful when reporting problems
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&GenerationError> for ErrorResponse {
    fn from(error: &GenerationError) -> Self {
        Self {
            code: error.code().to_owned(),
            error: error.user_message().to_owned(),
            detail: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(GenerationError::unconfigured("no key").http_status(), 503);
        assert_eq!(GenerationError::quota_exceeded("quota").http_status(), 429);
        assert_eq!(GenerationError::rate_limited("slow down").http_status(), 429);
        assert_eq!(GenerationError::auth_invalid("bad key").http_status(), 401);
        assert_eq!(GenerationError::unreachable("refused").http_status(), 502);
        assert_eq!(GenerationError::unparseable("prose").http_status(), 502);
    }

    #[test]
    fn test_only_quota_triggers_fallback() {
        assert!(GenerationError::quota_exceeded("billing").triggers_fallback());
        assert!(!GenerationError::rate_limited("429").triggers_fallback());
        assert!(!GenerationError::auth_invalid("401").triggers_fallback());
        assert!(!GenerationError::unreachable("down").triggers_fallback());
        assert!(!GenerationError::unparseable("text").triggers_fallback());
        assert!(!GenerationError::unconfigured("no key").triggers_fallback());
    }

    #[test]
    fn test_error_response_serialization() {
        let error = GenerationError::schema_violation("exercises is empty");
        let body = ErrorResponse::from(&error);
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("schema-violation"));
        assert!(json.contains("exercises is empty"));
    }
}
