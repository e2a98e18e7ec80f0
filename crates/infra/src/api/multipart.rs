//! Multipart form parts

use konexus_domain::FileUpload;
use reqwest::multipart::Part;

use super::errors::ApiError;

/// JSON document sent as a named form part.
pub fn json_part(json: String) -> Result<Part, ApiError> {
    Part::text(json)
        .mime_str("application/json")
        .map_err(|e| ApiError::Config(format!("invalid part content type: {e}")))
}

/// File contents with their name and content type.
pub fn file_part(upload: FileUpload) -> Result<Part, ApiError> {
    let content_type = upload.content_type.clone();
    Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(&content_type)
        .map_err(|e| ApiError::Config(format!("invalid content type {content_type}: {e}")))
}
