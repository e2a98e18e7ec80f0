//! Response envelopes shared by the Alerting service

use serde::{Deserialize, Serialize};

/// Outcome block attached to most Alerting responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseStatus {
    #[serde(default)]
    pub is_success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{ "status": {...}, "item": {...} }` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(item: T) -> Self {
        Self { status: ResponseStatus { is_success: true, ..ResponseStatus::default() }, item: Some(item) }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus { is_success: false, code: None, message: Some(message.into()) },
            item: None,
        }
    }

    /// Whether the service reported success
    pub fn is_success(&self) -> bool {
        self.status.is_success
    }

    /// The payload, only when the service reported success
    pub fn into_successful_item(self) -> Option<T> {
        if self.status.is_success {
            self.item
        } else {
            None
        }
    }
}
