//! Alerting service records
//!
//! `AlertSettings` comes back from `alerts/default`, is edited by the caller
//! and posted back inside a preview or send request. Every nested record
//! keeps its unknown fields so the round trip is lossless.

use serde::{Deserialize, Serialize};

use super::files::FileModel;
use super::geojson::FeatureCollection;
use super::response::ResponseStatus;
use super::ExtraFields;
use crate::impl_wire_name_conversions;

// ============================================================================
// Alert settings
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSettings {
    #[serde(default)]
    pub recipients: Recipients,
    #[serde(default)]
    pub message: AlertMessage,
    #[serde(default)]
    pub channels: Channels,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipients {
    /// URL of an uploaded CSV listing contacts outside the directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_hoc_file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_list_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_layers: Option<Vec<FeatureLayerSettings>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geofences: Option<FeatureCollection>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Population a geofence selects recipients from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeaturesSource {
    #[default]
    PublicUsers,
    Contacts,
    Locations,
}

impl_wire_name_conversions!(FeaturesSource {
    PublicUsers => "PublicUsers",
    Contacts => "Contacts",
    Locations => "Locations",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureLayerSettings {
    pub features_source: FeaturesSource,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertMessage {
    #[serde(default)]
    pub basic: BasicMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileDetails>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileAttachmentType {
    Public,
    Private,
}

/// File attached to an alert message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    pub attachment_type: FileAttachmentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

impl FileDetails {
    pub fn from_file(file: &FileModel, attachment_type: FileAttachmentType) -> Self {
        Self {
            content_type: file.content_type.clone(),
            file_name: file.file_name.clone(),
            length: file.length,
            public_url: file.public_url.clone(),
            attachment_type,
            description: file.description.clone(),
            metadata: file.metadata.clone(),
            owner_id: file.owner_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channels {
    #[serde(default)]
    pub text_message: ChannelSettings,
    #[serde(default)]
    pub email: ChannelSettings,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSettings {
    #[serde(default)]
    pub send: bool,
    #[serde(default)]
    pub primary: bool,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

// ============================================================================
// Requests and responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewAlertRequest {
    pub settings: AlertSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAlertRequest {
    pub settings: AlertSettings,
    /// Ask the service to queue delivery instead of waiting for it
    #[serde(rename = "async")]
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAlertResponse {
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(default)]
    pub alert_id: i64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl SendAlertResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub message: AlertMessage,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortenedUrlRequest {
    pub original_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenedUrl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    pub shortened_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCollectionRequest {
    pub counts_only: bool,
    pub geo_json: FeatureCollection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCountResponse {
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDistributionListFromFileRequest {
    pub file_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDistributionListFromFileResponse {
    pub id: i64,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertingGroup {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
