//! Alert with a file attachment sent to an ad-hoc contact list

use std::path::Path;
use std::sync::Arc;

use konexus_domain::{
    CreateDistributionListFromFileRequest, CreateShortenedUrlRequest, FileAttachmentType,
    FileDetails, FileModel, FileUpload, KonexusError, PreviewAlertRequest, Result,
    SendAlertRequest,
};
use tracing::{debug, info, instrument};

use super::ports::{AlertingPort, FileStoragePort};
use super::{confirm_sent, ensure_success, load_defaults, AlertOutcome};
use crate::utils::{ensure, require};

const SUBJECT: &str = "Alert with link";

pub struct SendAlertWithAttachmentUseCase {
    alerting: Arc<dyn AlertingPort>,
    files: Arc<dyn FileStoragePort>,
    tenant_id: i64,
}

impl SendAlertWithAttachmentUseCase {
    pub fn new(alerting: Arc<dyn AlertingPort>, files: Arc<dyn FileStoragePort>, tenant_id: i64) -> Self {
        Self { alerting, files, tenant_id }
    }

    /// Upload both files, then send an alert linking `file` to the contacts
    /// listed in `ad_hoc_file`.
    pub async fn run(&self, file: &Path, ad_hoc_file: &Path) -> Result<AlertOutcome> {
        self.upload_file(file).await?;
        self.upload_file(ad_hoc_file).await?;
        self.send_alert(file, ad_hoc_file).await
    }

    /// Upload a local file; the stored file must have a public URL.
    #[instrument(skip(self), fields(tenant = self.tenant_id))]
    pub async fn upload_file(&self, path: &Path) -> Result<FileModel> {
        let upload = FileUpload::from_path(path)?;
        debug!(file = %upload.file_name, bytes = upload.content_length(), "uploading file");

        let model = self.files.upload_file(self.tenant_id, upload).await?;
        ensure(model.public_url().is_some(), || {
            format!("Failed to get Public Url for new file: {}", path.display())
        })?;
        Ok(model)
    }

    /// Build the alert from tenant defaults and send it through the
    /// multipart attachment endpoint.
    #[instrument(skip(self), fields(tenant = self.tenant_id))]
    pub async fn send_alert(&self, file: &Path, ad_hoc_file: &Path) -> Result<AlertOutcome> {
        let mut settings = load_defaults(self.alerting.as_ref()).await?;

        // Single-file lookup is unreliable for CSV files, so search the listing.
        let ad_hoc_name = file_name(ad_hoc_file)?;
        let stored = self.files.list_files(self.tenant_id, false).await?;
        let ad_hoc_url = require(
            stored
                .iter()
                .find(|model| model.file_name == ad_hoc_name)
                .and_then(FileModel::public_url)
                .map(str::to_string),
            || format!("Failed to get Public Url for ad-hoc file: {}", ad_hoc_file.display()),
        )?;

        let list = self
            .alerting
            .create_distribution_list_from_file(
                self.tenant_id,
                &CreateDistributionListFromFileRequest { file_url: ad_hoc_url.clone() },
            )
            .await?;
        ensure(list.errors.is_empty(), || {
            format!("Failed to create ad-hoc contacts from file: {ad_hoc_url}")
        })?;
        settings.recipients.ad_hoc_file_url = Some(ad_hoc_url);
        settings.recipients.distribution_list_id = Some(list.id);

        let attachment = self.files.get_file(self.tenant_id, file_name(file)?).await?;
        let public_url = require(attachment.public_url().map(str::to_string), || {
            format!("Failed to get Public Url for attachment: {}", file.display())
        })?;

        let shortened = self
            .alerting
            .shorten_url(&CreateShortenedUrlRequest { original_url: public_url.clone() })
            .await?;
        ensure_success(&shortened, || format!("Failed to create shortened url for: {public_url}"))?;
        let short_url = require(shortened.into_successful_item(), || {
            format!("Shortened url response for {public_url} has no item")
        })?
        .shortened_url;

        settings.message.basic.subject = Some(SUBJECT.to_string());
        settings.message.basic.message = Some(format!("View file: {short_url}"));
        settings.message.files =
            Some(vec![FileDetails::from_file(&attachment, FileAttachmentType::Public)]);
        settings.channels.text_message.send = true;
        settings.channels.text_message.primary = true;

        let preview =
            self.alerting.preview_alert(&PreviewAlertRequest { settings: settings.clone() }).await?;
        ensure_success(&preview, || "Failed to create alert preview".to_string())?;

        let request = SendAlertRequest { settings, is_async: true };
        let alert_json = serde_json::to_string(&request)?;
        info!(list_id = list.id, "sending alert with attachment");

        let sent = self.alerting.send_alert_with_attachment(alert_json, None, true).await?;
        confirm_sent(self.alerting.as_ref(), sent).await
    }
}

fn file_name(path: &Path) -> Result<&str> {
    path.file_name().and_then(|name| name.to_str()).ok_or_else(|| {
        KonexusError::InvalidInput(format!("path has no file name: {}", path.display()))
    })
}
