//! OAuth 2.0 types for the client-credentials grant
//!
//! Defines the caller-supplied credentials, the token endpoint payloads and
//! the token set handed to service clients.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Client credentials and the scopes to request
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    /// Identity provider base URL (discovery document lives below it)
    pub authority_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Space-separated scopes; empty means "let the provider decide"
    pub scopes: String,
}

impl ClientCredentials {
    pub fn new(
        authority_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scopes: impl Into<String>,
    ) -> Self {
        Self {
            authority_url: authority_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes: scopes.into(),
        }
    }

    /// Reject credentials with an empty authority, client id or secret.
    ///
    /// # Errors
    /// Returns `AuthError::Config` naming the first missing argument.
    pub fn validate(&self) -> Result<(), AuthError> {
        let required = [
            ("authority_url", &self.authority_url),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AuthError::Config(format!(
                    "{name} must be provided to authenticate"
                )));
            }
        }

        Ok(())
    }

    /// Individual scope values, in order.
    pub fn scope_list(&self) -> impl Iterator<Item = &str> {
        self.scopes.split_whitespace()
    }
}

// Keeps the secret out of logs
impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("authority_url", &self.authority_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Access token with metadata
///
/// The client-credentials grant issues neither refresh nor ID tokens.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenSet {
    /// Bearer token for API authentication
    pub access_token: String,

    /// Token type (normally "Bearer")
    pub token_type: String,

    /// Access token lifetime in seconds, when the provider reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    /// Absolute expiration timestamp (UTC), computed at issue time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Granted scopes (space-separated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TokenSet {
    #[must_use]
    pub fn new(
        access_token: String,
        token_type: String,
        expires_in: Option<i64>,
        scope: Option<String>,
    ) -> Self {
        let expires_at = expires_in
            .filter(|secs| *secs > 0)
            .map(|secs| Utc::now() + chrono::Duration::seconds(secs));

        Self { access_token, token_type, expires_in, expires_at, scope }
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Successful token endpoint response (RFC 6749 §5.1)
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl From<TokenResponse> for TokenSet {
    fn from(response: TokenResponse) -> Self {
        Self::new(response.access_token, response.token_type, response.expires_in, response.scope)
    }
}

/// Token endpoint error response (RFC 6749 §5.2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthError {
    pub error: String,
    pub error_description: Option<String>,
}

impl fmt::Display for OAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_description {
            Some(desc) => write!(f, "{}: {}", self.error, desc),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for OAuthError {}
