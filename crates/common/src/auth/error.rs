//! Authentication errors

use thiserror::Error;

use super::types::OAuthError;

/// Error type for the client-credentials bootstrap
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required argument was missing or empty
    #[error("Configuration error: {0}")]
    Config(String),

    /// The discovery document could not be fetched or failed validation
    #[error("Discovery failed: {0}")]
    Discovery(String),

    /// The token endpoint answered with an OAuth error payload
    #[error("Token request rejected: {0}")]
    TokenEndpoint(OAuthError),

    /// The token endpoint answered with something other than a token
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AuthError {
    /// OAuth error code reported by the provider, if any.
    pub fn oauth_error(&self) -> Option<&str> {
        match self {
            Self::TokenEndpoint(err) => Some(&err.error),
            _ => None,
        }
    }
}
