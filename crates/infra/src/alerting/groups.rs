use konexus_domain::AlertingGroup;

use crate::api::{ApiClient, ApiError};

/// Recipient groups of a tenant
#[derive(Debug, Clone)]
pub struct AlertingGroupsClient {
    api: ApiClient,
}

impl AlertingGroupsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, tenant_id: i64) -> Result<Vec<AlertingGroup>, ApiError> {
        self.api.get(&format!("/tenants/{tenant_id}/groups")).await
    }
}
