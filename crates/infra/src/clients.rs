//! All three service clients built from one [`KonexusConfig`]
//!
//! One [`HttpClient`] is created and cloned into every service client, so
//! the Directory, Alerting and FileManagement calls of a run share a single
//! connection pool.

use std::sync::Arc;

use konexus_core::{RegisterUserUseCase, SendAlertWithAttachmentUseCase, SendAlertWithPolygonUseCase};
use konexus_domain::{DirectoryScope, KonexusConfig};
use tracing::info;

use crate::adapters::{AlertingAdapter, DirectoryAdapter, FileStorageAdapter};
use crate::alerting::AlertingClient;
use crate::api::{ApiClientConfig, ApiError};
use crate::directory::DirectoryClient;
use crate::file_management::FileManagementClient;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct KonexusClients {
    config: KonexusConfig,
    pub directory: DirectoryClient,
    pub alerting: AlertingClient,
    pub files: FileManagementClient,
}

impl KonexusClients {
    /// Unauthenticated clients for every configured service.
    ///
    /// # Errors
    ///
    /// `ApiError::Config` when the transport cannot be built or a base URL
    /// is invalid.
    pub fn from_config(config: KonexusConfig) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(config.http.timeout())
            .max_attempts(config.http.max_attempts)
            .build()?;

        let api_config =
            |base_url: &str| ApiClientConfig::new(base_url).with_timeout(config.http.timeout());

        Ok(Self {
            directory: DirectoryClient::with_config(api_config(&config.directory.base_url), http.clone())?,
            alerting: AlertingClient::with_config(api_config(&config.alerting.base_url), http.clone())?,
            files: FileManagementClient::with_config(api_config(&config.files.base_url), http)?,
            config,
        })
    }

    /// Build the clients and authenticate each one with its own scopes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_config`], plus `ApiError::Auth` when a token
    /// cannot be obtained.
    pub async fn connect(config: KonexusConfig) -> Result<Self, ApiError> {
        let mut clients = Self::from_config(config)?;
        clients.authenticate().await?;
        Ok(clients)
    }

    /// Run the client-credentials bootstrap for every service, one after
    /// another.
    ///
    /// # Errors
    ///
    /// The first bootstrap failure.
    pub async fn authenticate(&mut self) -> Result<(), ApiError> {
        let auth = &self.config.auth;

        self.directory
            .authenticate_with_client_credentials(
                &auth.authority_url,
                &auth.client_id,
                &auth.client_secret,
                Some(self.config.directory_scopes()),
            )
            .await?;
        self.alerting
            .authenticate_with_client_credentials(
                &auth.authority_url,
                &auth.client_id,
                &auth.client_secret,
                Some(self.config.alerting_scopes()),
            )
            .await?;
        self.files
            .authenticate_with_client_credentials(
                &auth.authority_url,
                &auth.client_id,
                &auth.client_secret,
                Some(self.config.files_scopes()),
            )
            .await?;

        info!(client_id = %auth.client_id, "all service clients authenticated");
        Ok(())
    }

    pub fn config(&self) -> &KonexusConfig {
        &self.config
    }

    pub fn directory_scope(&self) -> DirectoryScope {
        let tenant = &self.config.tenant;
        DirectoryScope::new(&tenant.directory_tenant_id, &tenant.directory_id, &tenant.realm_id)
    }

    pub fn register_user(&self) -> RegisterUserUseCase {
        RegisterUserUseCase::new(
            Arc::new(DirectoryAdapter::new(self.directory.clone())),
            self.directory_scope(),
        )
    }

    pub fn send_alert_with_attachment(&self) -> SendAlertWithAttachmentUseCase {
        SendAlertWithAttachmentUseCase::new(
            Arc::new(AlertingAdapter::new(self.alerting.clone())),
            Arc::new(FileStorageAdapter::new(self.files.clone())),
            self.config.tenant.alerting_tenant_id,
        )
    }

    pub fn send_alert_with_polygon(&self) -> SendAlertWithPolygonUseCase {
        SendAlertWithPolygonUseCase::new(Arc::new(AlertingAdapter::new(self.alerting.clone())))
    }
}
