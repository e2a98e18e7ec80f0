//! In-memory Alerting and FileManagement services

use std::sync::Mutex;

use async_trait::async_trait;
use konexus_core::{AlertingPort, FileStoragePort};
use konexus_domain::{
    AlertDetails, AlertMessage, AlertSettings, AlertStatus, ApiResponse, BasicMessage,
    CreateDistributionListFromFileRequest, CreateDistributionListFromFileResponse,
    CreateShortenedUrlRequest, FeatureCollectionRequest, FeatureCountResponse, FeaturesSource,
    FileModel, FileUpload, KonexusError, PreviewAlertRequest, Result, ResponseStatus,
    SendAlertRequest, SendAlertResponse, ShortenedUrl,
};
use serde_json::{json, Value};

pub const ALERT_ID: i64 = 4242;
pub const DISTRIBUTION_LIST_ID: i64 = 77;

#[derive(Default)]
struct AlertingState {
    calls: Vec<String>,
    previews: Vec<AlertSettings>,
    sent: Vec<SendAlertRequest>,
    attachment_json: Vec<String>,
    counted: Vec<(FeaturesSource, FeatureCollectionRequest)>,
}

pub struct FakeAlerting {
    state: Mutex<AlertingState>,
    defaults_succeed: bool,
    send_succeeds: bool,
    list_errors: Vec<Value>,
    feature_count: i64,
}

impl Default for FakeAlerting {
    fn default() -> Self {
        Self {
            state: Mutex::new(AlertingState::default()),
            defaults_succeed: true,
            send_succeeds: true,
            list_errors: Vec::new(),
            feature_count: 12,
        }
    }
}

impl FakeAlerting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_defaults() -> Self {
        Self { defaults_succeed: false, ..Self::default() }
    }

    pub fn failing_send() -> Self {
        Self { send_succeeds: false, ..Self::default() }
    }

    pub fn with_list_errors(errors: Vec<Value>) -> Self {
        Self { list_errors: errors, ..Self::default() }
    }

    pub fn with_feature_count(count: i64) -> Self {
        Self { feature_count: count, ..Self::default() }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn previews(&self) -> Vec<AlertSettings> {
        self.state.lock().unwrap().previews.clone()
    }

    pub fn sent(&self) -> Vec<SendAlertRequest> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn attachment_json(&self) -> Vec<String> {
        self.state.lock().unwrap().attachment_json.clone()
    }

    pub fn counted(&self) -> Vec<(FeaturesSource, FeatureCollectionRequest)> {
        self.state.lock().unwrap().counted.clone()
    }

    fn record(&self, call: &str) -> std::sync::MutexGuard<'_, AlertingState> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.to_string());
        state
    }

    fn send_response(&self) -> SendAlertResponse {
        SendAlertResponse {
            status: ResponseStatus { is_success: self.send_succeeds, ..ResponseStatus::default() },
            alert_id: ALERT_ID,
            extra: Default::default(),
        }
    }
}

/// Defaults with a field the use cases never touch
pub fn default_settings() -> AlertSettings {
    serde_json::from_value(json!({
        "recipients": { "groupIds": [1] },
        "message": { "basic": { "subject": "Default" } },
        "channels": { "textMessage": { "send": false }, "email": { "send": false } },
        "eventType": "Test"
    }))
    .unwrap()
}

#[async_trait]
impl AlertingPort for FakeAlerting {
    async fn alert_defaults(&self) -> Result<ApiResponse<AlertSettings>> {
        self.record("alert_defaults");
        Ok(if self.defaults_succeed {
            ApiResponse::success(default_settings())
        } else {
            ApiResponse::failure("defaults unavailable")
        })
    }

    async fn preview_alert(&self, request: &PreviewAlertRequest) -> Result<ApiResponse<Value>> {
        let mut state = self.record("preview_alert");
        state.previews.push(request.settings.clone());
        Ok(ApiResponse::success(json!({ "text": "preview" })))
    }

    async fn send_alert(&self, request: &SendAlertRequest) -> Result<SendAlertResponse> {
        let mut state = self.record("send_alert");
        state.sent.push(request.clone());
        Ok(self.send_response())
    }

    async fn send_alert_with_attachment(
        &self,
        alert_json: String,
        file: Option<FileUpload>,
        is_async: bool,
    ) -> Result<SendAlertResponse> {
        let mut state = self.record("send_alert_with_attachment");
        assert!(file.is_none());
        assert!(is_async);
        state.attachment_json.push(alert_json);
        Ok(self.send_response())
    }

    async fn alert_details(&self, alert_id: i64) -> Result<ApiResponse<AlertDetails>> {
        self.record("alert_details");
        let message = self
            .state
            .lock()
            .unwrap()
            .sent
            .last()
            .and_then(|req| req.settings.message.basic.message.clone())
            .unwrap_or_else(|| "sent".to_string());
        Ok(ApiResponse::success(AlertDetails {
            id: Some(alert_id),
            message: AlertMessage {
                basic: BasicMessage { subject: None, message: Some(message), extra: Default::default() },
                files: None,
                extra: Default::default(),
            },
            extra: Default::default(),
        }))
    }

    async fn alert_status(&self, _alert_id: i64) -> Result<ApiResponse<AlertStatus>> {
        self.record("alert_status");
        Ok(ApiResponse::success(AlertStatus { status: Some("Completed".into()), extra: Default::default() }))
    }

    async fn shorten_url(&self, request: &CreateShortenedUrlRequest) -> Result<ApiResponse<ShortenedUrl>> {
        self.record("shorten_url");
        Ok(ApiResponse::success(ShortenedUrl {
            original_url: Some(request.original_url.clone()),
            shortened_url: "https://sho.rt/abc".into(),
        }))
    }

    async fn count_features(
        &self,
        source: FeaturesSource,
        request: &FeatureCollectionRequest,
    ) -> Result<FeatureCountResponse> {
        let mut state = self.record("count_features");
        state.counted.push((source, request.clone()));
        Ok(FeatureCountResponse { count: self.feature_count })
    }

    async fn create_distribution_list_from_file(
        &self,
        _tenant_id: i64,
        _request: &CreateDistributionListFromFileRequest,
    ) -> Result<CreateDistributionListFromFileResponse> {
        self.record("create_distribution_list_from_file");
        Ok(CreateDistributionListFromFileResponse { id: DISTRIBUTION_LIST_ID, errors: self.list_errors.clone() })
    }
}

#[derive(Default)]
pub struct FakeFiles {
    files: Mutex<Vec<FileModel>>,
    /// Store files without a public URL
    private_only: bool,
}

impl FakeFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn private_only() -> Self {
        Self { private_only: true, ..Self::default() }
    }

    pub fn stored(&self) -> Vec<FileModel> {
        self.files.lock().unwrap().clone()
    }

    pub fn public_url(name: &str) -> String {
        format!("https://files.example.com/1211/{name}")
    }
}

#[async_trait]
impl FileStoragePort for FakeFiles {
    async fn upload_file(&self, _tenant_id: i64, upload: FileUpload) -> Result<FileModel> {
        let model = FileModel {
            public_url: (!self.private_only).then(|| Self::public_url(&upload.file_name)),
            file_name: upload.file_name,
            content_type: Some(upload.content_type),
            length: Some(upload.bytes.len() as i64),
            description: None,
            metadata: None,
            owner_id: Some("owner-1".into()),
            extra: Default::default(),
        };
        self.files.lock().unwrap().push(model.clone());
        Ok(model)
    }

    async fn get_file(&self, _tenant_id: i64, file_name: &str) -> Result<FileModel> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .find(|file| file.file_name == file_name)
            .cloned()
            .ok_or_else(|| KonexusError::NotFound(file_name.to_string()))
    }

    async fn list_files(&self, _tenant_id: i64, _include_private: bool) -> Result<Vec<FileModel>> {
        Ok(self.files.lock().unwrap().clone())
    }
}
