//! Inference error types

use thiserror::Error;

/// Upstream failure with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
}

impl LlmError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Unavailable, message)
    }

    /// Non-success status; `body` is the raw response body
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(
            LlmErrorKind::Http { status },
            format!("HTTP {status}: {body}"),
        )
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Malformed, message)
    }

    /// HTTP status code, if the upstream answered at all
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            LlmErrorKind::Http { status } => Some(status),
            LlmErrorKind::Unavailable | LlmErrorKind::Malformed => None,
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// No connection, DNS failure, refused, timed out
    Unavailable,
    /// Non-2xx status
    Http { status: u16 },
    /// Success status but the body is not usable JSON
    Malformed,
}

impl LlmErrorKind {
    /// Stable identifier used in API error bodies and logs
    pub fn category(self) -> &'static str {
        match self {
            Self::Unavailable => "upstream_unavailable",
            Self::Http { .. } => "upstream_http_error",
            Self::Malformed => "upstream_malformed",
        }
    }
}
