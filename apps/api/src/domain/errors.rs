use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by an upstream provider (language model or web search)
///
/// Each variant corresponds to one class of failure so callers can decide
/// whether a request is worth repeating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after: Option<Duration>,
    },

    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("bad request (HTTP {status}): {message}")]
    BadRequest { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to parse provider response: {0}")]
    Parse(String),
}

impl ProviderError {
    /// Classify a non-success HTTP status returned by a provider
    ///
    /// 529 is Anthropic's "overloaded" status and is treated like a 503.
    pub fn from_status(status: u16, message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        let message = message.into();
        match status {
            401 => ProviderError::Auth(message),
            403 => ProviderError::PermissionDenied(message),
            404 => ProviderError::NotFound(message),
            429 => ProviderError::RateLimited {
                message,
                retry_after,
            },
            500..=599 => ProviderError::Server { status, message },
            _ => ProviderError::BadRequest { status, message },
        }
    }

    /// Whether repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited { .. }
                | ProviderError::Server { .. }
                | ProviderError::Network(_)
        )
    }

    /// HTTP status the provider answered with, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProviderError::Auth(_) => Some(401),
            ProviderError::PermissionDenied(_) => Some(403),
            ProviderError::NotFound(_) => Some(404),
            ProviderError::RateLimited { .. } => Some(429),
            ProviderError::Server { status, .. } | ProviderError::BadRequest { status, .. } => {
                Some(*status)
            }
            ProviderError::Network(_) | ProviderError::Parse(_) => None,
        }
    }

    /// Delay the provider asked for via `Retry-After`
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ProviderError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Network(format!("request timed out: {}", err))
        } else if err.is_connect() {
            ProviderError::Network(format!("connection failed: {}", err))
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
