//! API-specific error types
//!
//! Provides error classification for REST operations against the Konexus
//! services.

use std::time::Duration;

use konexus_common::auth::AuthError;
use konexus_domain::KonexusError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::errors::status_error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403, failed token bootstrap)
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth) and undecodable responses
    Client,
    /// Network/connection errors and timeouts
    Network,
    /// Configuration errors
    Config,
    /// Failures inside the client itself
    Internal,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The service answered with a non-success status
    #[error("{} returned status {status}{}", format_url(.url), format_body(.body))]
    Status { status: StatusCode, url: String, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn format_url(url: &str) -> &str {
    if url.is_empty() {
        "service"
    } else {
        url
    }
}

fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::Config(_) => ApiErrorCategory::Config,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Client,
            Self::Internal(_) => ApiErrorCategory::Internal,
            Self::Status { status, .. } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ApiErrorCategory::Authentication
                }
                StatusCode::TOO_MANY_REQUESTS => ApiErrorCategory::RateLimit,
                s if s.is_server_error() => ApiErrorCategory::Server,
                _ => ApiErrorCategory::Client,
            },
        }
    }

    /// HTTP status of a `Status` error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of a `Status` error.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Config(msg) => Self::Config(msg),
            AuthError::Transport(err) if err.is_timeout() || err.is_connect() => {
                Self::Network(err.to_string())
            }
            other => Self::Auth(other.to_string()),
        }
    }
}

impl From<KonexusError> for ApiError {
    fn from(err: KonexusError) -> Self {
        match err {
            KonexusError::Config(msg) => Self::Config(msg),
            KonexusError::Auth(msg) => Self::Auth(msg),
            KonexusError::Network(msg) => Self::Network(msg),
            KonexusError::Api { status, message } => match StatusCode::from_u16(status) {
                Ok(status) => Self::Status { status, url: String::new(), body: message },
                Err(_) => Self::Internal(format!("invalid status {status}: {message}")),
            },
            KonexusError::NotFound(msg) => {
                Self::Status { status: StatusCode::NOT_FOUND, url: String::new(), body: msg }
            }
            KonexusError::InvalidInput(msg) => Self::Config(msg),
            KonexusError::Internal(msg) => Self::Internal(msg),
            other @ (KonexusError::Expectation(_) | KonexusError::Io(_)) => {
                Self::Internal(other.to_string())
            }
        }
    }
}

impl From<ApiError> for KonexusError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(msg) => Self::Auth(msg),
            ApiError::Config(msg) => Self::Config(msg),
            ApiError::Network(msg) => Self::Network(msg),
            ApiError::Timeout(after) => Self::Network(format!("request timed out after {after:?}")),
            ApiError::Decode(msg) => Self::Internal(format!("Failed to decode response: {msg}")),
            ApiError::Internal(msg) => Self::Internal(msg),
            status @ ApiError::Status { .. } => {
                let code = status.status().map_or(0, |s| s.as_u16());
                status_error(code, status.to_string())
            }
        }
    }
}
