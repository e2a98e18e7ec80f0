//! FileManagement service client

pub mod files;

use std::sync::Arc;

use konexus_common::auth::ClientCredentials;
use konexus_domain::constants::FILE_MANAGEMENT_DEFAULT_SCOPES;
use tracing::info;

pub use files::FilesClient;

use crate::api::{ApiClient, ApiClientConfig, ApiError, ClientCredentialsTokenProvider, StaticToken};
use crate::http::HttpClient;

/// Entry point to the FileManagement service
#[derive(Debug, Clone)]
pub struct FileManagementClient {
    api: ApiClient,
    files: FilesClient,
}

impl FileManagementClient {
    /// Unauthenticated client for the FileManagement service at `base_url`.
    ///
    /// # Errors
    ///
    /// `ApiError::Config` if `base_url` is empty or not an HTTP(S) URL.
    pub fn new(base_url: &str, http: HttpClient) -> Result<Self, ApiError> {
        Self::with_config(ApiClientConfig::new(base_url), http)
    }

    pub fn with_config(config: ApiClientConfig, http: HttpClient) -> Result<Self, ApiError> {
        Ok(Self::from_api(ApiClient::new(config, http)?))
    }

    fn from_api(api: ApiClient) -> Self {
        Self { files: FilesClient::new(api.clone()), api }
    }

    /// Obtain a token with the client-credentials grant. Scopes default to
    /// `"tamarack"`.
    ///
    /// # Errors
    ///
    /// `ApiError::Config` for missing arguments, `ApiError::Auth` when
    /// discovery or the token exchange fails.
    pub async fn authenticate_with_client_credentials(
        &mut self,
        authority_url: &str,
        client_id: &str,
        client_secret: &str,
        scopes: Option<&str>,
    ) -> Result<(), ApiError> {
        let credentials = ClientCredentials::new(
            authority_url,
            client_id,
            client_secret,
            scopes.unwrap_or(FILE_MANAGEMENT_DEFAULT_SCOPES),
        );
        let provider = ClientCredentialsTokenProvider::acquire(self.api.http(), credentials).await?;
        *self = Self::from_api(self.api.clone().with_auth(provider));
        info!(base_url = %self.api.base_url(), "file management client authenticated");
        Ok(())
    }

    /// Use a token acquired elsewhere.
    #[must_use]
    pub fn with_access_token(self, token: impl Into<String>) -> Self {
        Self::from_api(self.api.with_auth(Arc::new(StaticToken::new(token))))
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.is_authenticated()
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    pub fn files(&self) -> &FilesClient {
        &self.files
    }
}
