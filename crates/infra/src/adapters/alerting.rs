//! `AlertingPort` and `FileStoragePort` over the REST clients

use async_trait::async_trait;
use konexus_core::{AlertingPort, FileStoragePort};
use konexus_domain::{
    AlertDetails, AlertSettings, AlertStatus, ApiResponse, CreateDistributionListFromFileRequest,
    CreateDistributionListFromFileResponse, CreateShortenedUrlRequest, FeatureCollectionRequest,
    FeatureCountResponse, FeaturesSource, FileModel, FileUpload, PreviewAlertRequest, Result,
    SendAlertRequest, SendAlertResponse, ShortenedUrl,
};
use serde_json::Value;

use crate::alerting::AlertingClient;
use crate::file_management::FileManagementClient;

#[derive(Debug, Clone)]
pub struct AlertingAdapter {
    client: AlertingClient,
}

impl AlertingAdapter {
    pub fn new(client: AlertingClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AlertingClient {
        &self.client
    }
}

#[async_trait]
impl AlertingPort for AlertingAdapter {
    async fn alert_defaults(&self) -> Result<ApiResponse<AlertSettings>> {
        Ok(self.client.alerts().get_defaults().await?)
    }

    async fn preview_alert(&self, request: &PreviewAlertRequest) -> Result<ApiResponse<Value>> {
        Ok(self.client.alerts().create_preview(request).await?)
    }

    async fn send_alert(&self, request: &SendAlertRequest) -> Result<SendAlertResponse> {
        Ok(self.client.alerts().create(request).await?)
    }

    async fn send_alert_with_attachment(
        &self,
        alert_json: String,
        file: Option<FileUpload>,
        is_async: bool,
    ) -> Result<SendAlertResponse> {
        Ok(self.client.alerts().create_with_attachment(alert_json, file, is_async).await?)
    }

    async fn alert_details(&self, alert_id: i64) -> Result<ApiResponse<AlertDetails>> {
        Ok(self.client.alerts().get_by_id(alert_id).await?)
    }

    async fn alert_status(&self, alert_id: i64) -> Result<ApiResponse<AlertStatus>> {
        Ok(self.client.alerts().get_status(alert_id).await?)
    }

    async fn shorten_url(
        &self,
        request: &CreateShortenedUrlRequest,
    ) -> Result<ApiResponse<ShortenedUrl>> {
        Ok(self.client.alerts().create_shortened_url(request).await?)
    }

    async fn count_features(
        &self,
        source: FeaturesSource,
        request: &FeatureCollectionRequest,
    ) -> Result<FeatureCountResponse> {
        Ok(self.client.alerts().post_features_count(source, request).await?)
    }

    async fn create_distribution_list_from_file(
        &self,
        tenant_id: i64,
        request: &CreateDistributionListFromFileRequest,
    ) -> Result<CreateDistributionListFromFileResponse> {
        Ok(self.client.contacts().create_from_file(tenant_id, request).await?)
    }
}

#[derive(Debug, Clone)]
pub struct FileStorageAdapter {
    client: FileManagementClient,
}

impl FileStorageAdapter {
    pub fn new(client: FileManagementClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FileManagementClient {
        &self.client
    }
}

#[async_trait]
impl FileStoragePort for FileStorageAdapter {
    async fn upload_file(&self, tenant_id: i64, upload: FileUpload) -> Result<FileModel> {
        Ok(self.client.files().upload(tenant_id, upload).await?)
    }

    async fn get_file(&self, tenant_id: i64, file_name: &str) -> Result<FileModel> {
        Ok(self.client.files().get(tenant_id, file_name).await?)
    }

    async fn list_files(&self, tenant_id: i64, include_private: bool) -> Result<Vec<FileModel>> {
        Ok(self.client.files().list(tenant_id, include_private).await?)
    }
}
