//! Port interfaces for the Alerting and FileManagement services

use async_trait::async_trait;
use konexus_domain::{
    AlertDetails, AlertSettings, AlertStatus, ApiResponse, CreateDistributionListFromFileRequest,
    CreateDistributionListFromFileResponse, CreateShortenedUrlRequest, FeatureCollectionRequest,
    FeatureCountResponse, FeaturesSource, FileModel, FileUpload, PreviewAlertRequest, Result,
    SendAlertRequest, SendAlertResponse, ShortenedUrl,
};
use serde_json::Value;

/// Alert composition and delivery
#[async_trait]
pub trait AlertingPort: Send + Sync {
    /// Tenant defaults used as the starting point of a new alert
    async fn alert_defaults(&self) -> Result<ApiResponse<AlertSettings>>;

    async fn preview_alert(&self, request: &PreviewAlertRequest) -> Result<ApiResponse<Value>>;

    async fn send_alert(&self, request: &SendAlertRequest) -> Result<SendAlertResponse>;

    /// Send an alert serialized as JSON, optionally with a file part
    async fn send_alert_with_attachment(
        &self,
        alert_json: String,
        file: Option<FileUpload>,
        is_async: bool,
    ) -> Result<SendAlertResponse>;

    async fn alert_details(&self, alert_id: i64) -> Result<ApiResponse<AlertDetails>>;

    async fn alert_status(&self, alert_id: i64) -> Result<ApiResponse<AlertStatus>>;

    async fn shorten_url(
        &self,
        request: &CreateShortenedUrlRequest,
    ) -> Result<ApiResponse<ShortenedUrl>>;

    /// Number of recipients of `source` inside the request's geometry
    async fn count_features(
        &self,
        source: FeaturesSource,
        request: &FeatureCollectionRequest,
    ) -> Result<FeatureCountResponse>;

    async fn create_distribution_list_from_file(
        &self,
        tenant_id: i64,
        request: &CreateDistributionListFromFileRequest,
    ) -> Result<CreateDistributionListFromFileResponse>;
}

/// File storage used for alert attachments and ad-hoc contact lists
#[async_trait]
pub trait FileStoragePort: Send + Sync {
    async fn upload_file(&self, tenant_id: i64, upload: FileUpload) -> Result<FileModel>;

    async fn get_file(&self, tenant_id: i64, file_name: &str) -> Result<FileModel>;

    async fn list_files(&self, tenant_id: i64, include_private: bool) -> Result<Vec<FileModel>>;
}
