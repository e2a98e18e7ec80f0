//! Alerting use cases

pub mod attachment;
pub mod geofence;
pub mod ports;

pub use attachment::SendAlertWithAttachmentUseCase;
pub use geofence::SendAlertWithPolygonUseCase;
use konexus_domain::{AlertSettings, ApiResponse, Result, SendAlertResponse};
use ports::AlertingPort;
use tracing::info;

use crate::utils::{ensure, require};

/// What the service reports about a sent alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertOutcome {
    pub alert_id: i64,
    pub message: Option<String>,
    pub status: Option<String>,
}

/// Fetch tenant defaults, failing unless the service reports success.
async fn load_defaults(alerting: &dyn AlertingPort) -> Result<AlertSettings> {
    let response = alerting.alert_defaults().await?;
    ensure(response.is_success(), || "Failed to get alert defaults".to_string())?;
    require(response.into_successful_item(), || "Alert defaults response has no settings".to_string())
}

fn ensure_success<T>(response: &ApiResponse<T>, what: impl FnOnce() -> String) -> Result<()> {
    ensure(response.is_success(), what)
}

/// Check the send response, then read back details and status of the alert.
async fn confirm_sent(alerting: &dyn AlertingPort, sent: SendAlertResponse) -> Result<AlertOutcome> {
    ensure(sent.is_success(), || "Failed to send alert".to_string())?;
    let alert_id = sent.alert_id;

    let details = alerting.alert_details(alert_id).await?;
    ensure_success(&details, || format!("Failed to get alert details for alert: {alert_id}"))?;
    let message = details.item.and_then(|item| item.message.basic.message);

    let status = alerting.alert_status(alert_id).await?;
    ensure_success(&status, || format!("Failed to get the status for alert: {alert_id}"))?;
    let status = status.item.and_then(|item| item.status);

    info!(alert_id, message = ?message, status = ?status, "alert sent");
    Ok(AlertOutcome { alert_id, message, status })
}
