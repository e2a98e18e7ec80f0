//! Alert composition, delivery and tracking

use konexus_domain::{
    AlertDetails, AlertSettings, AlertStatus, ApiResponse, CreateShortenedUrlRequest,
    FeatureCollectionRequest, FeatureCountResponse, FeaturesSource, FileUpload,
    PreviewAlertRequest, SendAlertRequest, SendAlertResponse, ShortenedUrl,
};
use reqwest::multipart::Form;
use serde_json::Value;

use crate::api::multipart::{file_part, json_part};
use crate::api::{ApiClient, ApiError};

/// `/alerts`
#[derive(Debug, Clone)]
pub struct AlertsClient {
    api: ApiClient,
}

impl AlertsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Tenant defaults a new alert starts from.
    pub async fn get_defaults(&self) -> Result<ApiResponse<AlertSettings>, ApiError> {
        self.api.get("/alerts/default").await
    }

    /// Render an alert without sending it.
    pub async fn create_preview(
        &self,
        request: &PreviewAlertRequest,
    ) -> Result<ApiResponse<Value>, ApiError> {
        self.api.post("/alerts/preview", request).await
    }

    pub async fn create(&self, request: &SendAlertRequest) -> Result<SendAlertResponse, ApiError> {
        self.api.post("/alerts", request).await
    }

    /// Send an alert whose settings are already serialized, with an optional
    /// file attached.
    ///
    /// The form carries an `alert` part holding the JSON and, when given, a
    /// `file` part.
    pub async fn create_with_attachment(
        &self,
        alert_json: String,
        file: Option<FileUpload>,
        is_async: bool,
    ) -> Result<SendAlertResponse, ApiError> {
        let mut form = Form::new().part("alert", json_part(alert_json)?);
        if let Some(upload) = file {
            form = form.part("file", file_part(upload)?);
        }

        self.api
            .post_multipart("/alerts/attachment", &[("async", is_async.to_string())], form)
            .await
    }

    pub async fn get_by_id(&self, alert_id: i64) -> Result<ApiResponse<AlertDetails>, ApiError> {
        self.api.get(&format!("/alerts/{alert_id}")).await
    }

    pub async fn get_status(&self, alert_id: i64) -> Result<ApiResponse<AlertStatus>, ApiError> {
        self.api.get(&format!("/alerts/{alert_id}/status")).await
    }

    pub async fn create_shortened_url(
        &self,
        request: &CreateShortenedUrlRequest,
    ) -> Result<ApiResponse<ShortenedUrl>, ApiError> {
        self.api.post("/alerts/shortened-url", request).await
    }

    /// Count the recipients of `source` inside the request's geometry.
    pub async fn post_features_count(
        &self,
        source: FeaturesSource,
        request: &FeatureCollectionRequest,
    ) -> Result<FeatureCountResponse, ApiError> {
        self.api
            .post_with_query(
                "/alerts/features/count",
                &[("featuresSource", source.as_str().to_string())],
                request,
            )
            .await
    }
}
