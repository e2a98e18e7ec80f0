use konexus_domain::GroupSummaryPage;

use super::directory_path;
use crate::api::{ApiClient, ApiError};

/// Directory groups
#[derive(Debug, Clone)]
pub struct GroupsClient {
    api: ApiClient,
}

impl GroupsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Groups a user may discover and join, as a tree.
    pub async fn discover_groups(
        &self,
        tenant_id: &str,
        directory_id: &str,
    ) -> Result<GroupSummaryPage, ApiError> {
        self.api.get(&format!("{}/groups/discover", directory_path(tenant_id, directory_id))).await
    }
}
