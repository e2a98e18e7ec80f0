//! Tenant file storage

use konexus_domain::{FileModel, FileUpload};
use reqwest::multipart::Form;
use tracing::debug;

use crate::api::multipart::file_part;
use crate::api::{encode_segment, ApiClient, ApiError};

/// `/v4/tenants/{tenant}/files`
#[derive(Debug, Clone)]
pub struct FilesClient {
    api: ApiClient,
}

impl FilesClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn files_path(tenant_id: i64) -> String {
        format!("/v4/tenants/{tenant_id}/files")
    }

    fn file_path(tenant_id: i64, file_name: &str) -> String {
        format!("{}/{}", Self::files_path(tenant_id), encode_segment(file_name))
    }

    /// Upload a file as a `file` form part; name, type and length also go in
    /// the query string.
    pub async fn upload(&self, tenant_id: i64, upload: FileUpload) -> Result<FileModel, ApiError> {
        let query = [
            ("fileName", upload.file_name.clone()),
            ("contentType", upload.content_type.clone()),
            ("contentLength", upload.content_length().to_string()),
        ];
        debug!(file = %upload.file_name, bytes = upload.content_length(), "uploading file");

        let form = Form::new().part("file", file_part(upload)?);
        self.api.post_multipart(&Self::files_path(tenant_id), &query, form).await
    }

    pub async fn get(&self, tenant_id: i64, file_name: &str) -> Result<FileModel, ApiError> {
        self.api.get(&Self::file_path(tenant_id, file_name)).await
    }

    pub async fn list(&self, tenant_id: i64, include_private: bool) -> Result<Vec<FileModel>, ApiError> {
        self.api
            .get_with_query(
                &Self::files_path(tenant_id),
                &[("includePrivate", include_private.to_string())],
            )
            .await
    }

    pub async fn delete(&self, tenant_id: i64, file_name: &str) -> Result<(), ApiError> {
        self.api.delete(&Self::file_path(tenant_id, file_name)).await
    }
}
