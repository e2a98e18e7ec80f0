//! Test-only endpoints exposing verification codes that are normally sent
//! out of band

use konexus_domain::PendingVerification;

use crate::api::{encode_segment, ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct TestClient {
    api: ApiClient,
}

impl TestClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Pending code for `email`, `None` when there is none.
    pub async fn get_pending_email_verification(
        &self,
        email: &str,
    ) -> Result<Option<PendingVerification>, ApiError> {
        self.api.get_optional(&format!("/test/verifications/email/{}", encode_segment(email))).await
    }

    /// Pending code for `phone`, `None` when there is none.
    pub async fn get_pending_phone_verification(
        &self,
        phone: &str,
    ) -> Result<Option<PendingVerification>, ApiError> {
        self.api.get_optional(&format!("/test/verifications/phone/{}", encode_segment(phone))).await
    }
}
