//! Bearer token sources for the API client
//!
//! Tokens come either from the caller ([`StaticToken`]) or from the OAuth
//! client-credentials bootstrap ([`ClientCredentialsTokenProvider`]), which
//! runs discovery and the token exchange once and then hands out the cached
//! token. There is no refresh: a client that outlives its token must be
//! re-authenticated.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use konexus_common::auth::{ClientCredentials, ClientCredentialsAuthenticator};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// A token acquired elsewhere.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StaticToken").field(&"<redacted>").finish()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String, ApiError> {
        Ok(self.0.clone())
    }
}

/// Client-credentials token fetched on first use and cached for the life of
/// the provider.
pub struct ClientCredentialsTokenProvider {
    authenticator: ClientCredentialsAuthenticator,
    credentials: ClientCredentials,
    token: OnceCell<String>,
}

impl ClientCredentialsTokenProvider {
    pub fn new(authenticator: ClientCredentialsAuthenticator, credentials: ClientCredentials) -> Self {
        Self { authenticator, credentials, token: OnceCell::new() }
    }

    /// Authenticate now over `http`'s connection pool and return the
    /// provider holding the token.
    ///
    /// # Errors
    ///
    /// `ApiError::Config` for missing credentials, `ApiError::Auth` when
    /// discovery or the token exchange fails.
    pub async fn acquire(http: &HttpClient, credentials: ClientCredentials) -> Result<Arc<Self>, ApiError> {
        let authenticator = ClientCredentialsAuthenticator::with_http_client(http.inner().clone());
        let provider = Self::new(authenticator, credentials);
        provider.access_token().await?;
        Ok(Arc::new(provider))
    }

    pub fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// Whether the token exchange already happened.
    pub fn is_authenticated(&self) -> bool {
        self.token.initialized()
    }
}

impl fmt::Debug for ClientCredentialsTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsTokenProvider")
            .field("credentials", &self.credentials)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsTokenProvider {
    async fn access_token(&self) -> Result<String, ApiError> {
        let token = self
            .token
            .get_or_try_init(|| async {
                debug!(client_id = %self.credentials.client_id, "fetching client credentials token");
                let tokens = self.authenticator.authenticate(&self.credentials).await?;
                info!(scope = ?tokens.scope, "client authenticated");
                Ok::<_, ApiError>(tokens.access_token)
            })
            .await?;
        Ok(token.clone())
    }
}
