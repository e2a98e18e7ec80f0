//! Client-credentials authenticator
//!
//! Discovers the token endpoint of an authority and exchanges client
//! credentials for an access token.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::discovery::{self, DiscoveryDocument, DiscoveryPolicy};
use super::error::AuthError;
use super::types::{ClientCredentials, OAuthError, TokenResponse, TokenSet};

/// OAuth 2.0 client-credentials authenticator
#[derive(Debug, Clone)]
pub struct ClientCredentialsAuthenticator {
    client: Client,
    policy: DiscoveryPolicy,
}

impl ClientCredentialsAuthenticator {
    /// Create an authenticator with its own HTTP client (30 s timeout).
    ///
    /// # Errors
    /// Returns `AuthError::Transport` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, AuthError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self::with_http_client(client))
    }

    /// Create an authenticator that reuses an existing connection pool.
    #[must_use]
    pub fn with_http_client(client: Client) -> Self {
        Self { client, policy: DiscoveryPolicy::default() }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: DiscoveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &DiscoveryPolicy {
        &self.policy
    }

    /// Fetch and validate the discovery document, returning it together with
    /// the token endpoint.
    ///
    /// # Errors
    /// Returns `AuthError::Discovery` if the document is unreachable or fails
    /// the configured policy.
    pub async fn discover(&self, authority: &str) -> Result<(DiscoveryDocument, Url), AuthError> {
        let authority = discovery::normalize_authority(authority);
        let document = discovery::fetch_document(&self.client, authority).await?;
        let token_endpoint = self.policy.validate(authority, &document)?;
        Ok((document, token_endpoint))
    }

    /// Exchange client credentials at `token_endpoint`.
    ///
    /// Client id and secret travel in the form body.
    ///
    /// # Errors
    /// - `AuthError::TokenEndpoint` when the provider returns an OAuth error
    /// - `AuthError::InvalidResponse` when the response is not a token
    /// - `AuthError::Transport` when the request itself fails
    pub async fn request_token(
        &self,
        token_endpoint: &Url,
        credentials: &ClientCredentials,
    ) -> Result<TokenSet, AuthError> {
        let mut params = vec![
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let scopes = credentials.scopes.trim();
        if !scopes.is_empty() {
            params.push(("scope", scopes));
        }

        debug!(%token_endpoint, scope = scopes, "requesting client credentials token");
        let response = self.client.post(token_endpoint.clone()).form(&params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%token_endpoint, %status, "token endpoint returned an error");
            let error = serde_json::from_str::<OAuthError>(&body).unwrap_or_else(|_| OAuthError {
                error: format!("http_{}", status.as_u16()),
                error_description: (!body.is_empty()).then_some(body),
            });
            return Err(AuthError::TokenEndpoint(error));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|err| AuthError::InvalidResponse(err.to_string()))?;

        if token.access_token.is_empty() {
            return Err(AuthError::InvalidResponse("token endpoint returned an empty access_token".into()));
        }

        Ok(token.into())
    }

    /// Run the whole bootstrap: validate, discover, exchange.
    ///
    /// # Errors
    /// Returns `AuthError::Config` for missing arguments, otherwise whatever
    /// discovery or the token exchange reports.
    #[instrument(skip(self, credentials), fields(authority = %credentials.authority_url, client_id = %credentials.client_id))]
    pub async fn authenticate(&self, credentials: &ClientCredentials) -> Result<TokenSet, AuthError> {
        credentials.validate()?;

        let (_, token_endpoint) = self.discover(&credentials.authority_url).await?;
        let tokens = self.request_token(&token_endpoint, credentials).await?;

        info!(expires_in = ?tokens.expires_in, "client credentials token acquired");
        Ok(tokens)
    }
}
