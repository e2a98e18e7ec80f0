//! Directory service client
//!
//! Users, their emails and phones, realm metadata, discoverable groups and
//! the test API that exposes pending verification codes.

pub mod groups;
pub mod meta;
pub mod test_api;
pub mod users;

use std::sync::Arc;

use konexus_common::auth::ClientCredentials;
use konexus_domain::constants::DIRECTORY_DEFAULT_SCOPES;
use tracing::info;

pub use groups::GroupsClient;
pub use meta::MetaClient;
pub use test_api::TestClient;
pub use users::UsersClient;

use crate::api::{
    encode_segment, ApiClient, ApiClientConfig, ApiError, ClientCredentialsTokenProvider,
    StaticToken,
};
use crate::http::HttpClient;

pub(crate) fn directory_path(tenant_id: &str, directory_id: &str) -> String {
    format!("/tenants/{}/directories/{}", encode_segment(tenant_id), encode_segment(directory_id))
}

/// Entry point to the Directory service
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    api: ApiClient,
    users: UsersClient,
    meta: MetaClient,
    groups: GroupsClient,
    test: TestClient,
}

impl DirectoryClient {
    /// Unauthenticated client for the Directory at `base_url`.
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
        Self {
            users: UsersClient::new(api.clone()),
            meta: MetaClient::new(api.clone()),
            groups: GroupsClient::new(api.clone()),
            test: TestClient::new(api.clone()),
            api,
        }
    }

    /// Obtain a token with the client-credentials grant and use it for every
    /// later request. Scopes default to `"tamarack content"`.
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
            scopes.unwrap_or(DIRECTORY_DEFAULT_SCOPES),
        );
        let provider = ClientCredentialsTokenProvider::acquire(self.api.http(), credentials).await?;
        *self = Self::from_api(self.api.clone().with_auth(provider));
        info!(base_url = %self.api.base_url(), "directory client authenticated");
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

    pub fn users(&self) -> &UsersClient {
        &self.users
    }

    pub fn meta(&self) -> &MetaClient {
        &self.meta
    }

    pub fn groups(&self) -> &GroupsClient {
        &self.groups
    }

    pub fn test(&self) -> &TestClient {
        &self.test
    }
}
