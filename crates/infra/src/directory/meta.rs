//! Realm metadata: time zones and languages offered to users

use konexus_domain::{AvailableLanguagesResponse, AvailableTimeZonesResponse};

use crate::api::{encode_segment, ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct MetaClient {
    api: ApiClient,
}

impl MetaClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_time_zones(&self, realm_id: &str) -> Result<AvailableTimeZonesResponse, ApiError> {
        self.api.get(&format!("/realms/{}/meta/timezones", encode_segment(realm_id))).await
    }

    pub async fn get_languages(&self, realm_id: &str) -> Result<AvailableLanguagesResponse, ApiError> {
        self.api.get(&format!("/realms/{}/meta/languages", encode_segment(realm_id))).await
    }
}
