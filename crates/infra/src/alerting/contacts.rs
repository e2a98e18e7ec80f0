use konexus_domain::{CreateDistributionListFromFileRequest, CreateDistributionListFromFileResponse};

use crate::api::{ApiClient, ApiError};

/// Contacts and distribution lists of a tenant
#[derive(Debug, Clone)]
pub struct ContactsClient {
    api: ApiClient,
}

impl ContactsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Build a distribution list from a contacts CSV already uploaded to
    /// file storage. Rows the service rejects come back in `errors`.
    pub async fn create_from_file(
        &self,
        tenant_id: i64,
        request: &CreateDistributionListFromFileRequest,
    ) -> Result<CreateDistributionListFromFileResponse, ApiError> {
        self.api.post(&format!("/tenants/{tenant_id}/contacts/distribution-lists/file"), request).await
    }
}
