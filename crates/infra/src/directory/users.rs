//! Users of a directory and their contact points

use konexus_domain::{
    AddEmailCommand, AddPhoneCommand, CreateUserProfileCommand, EmailAddress, FindUserQuery,
    PhoneNumber, UserProfile, UserProfileSummaryPage, VerificationResult, VerifyContactCommand,
};

use super::directory_path;
use crate::api::{encode_segment, ApiClient, ApiError};

/// `/tenants/{tenant}/directories/{directory}/users`
#[derive(Debug, Clone)]
pub struct UsersClient {
    api: ApiClient,
}

impl UsersClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn users_path(tenant_id: &str, directory_id: &str) -> String {
        format!("{}/users", directory_path(tenant_id, directory_id))
    }

    fn user_path(tenant_id: &str, directory_id: &str, user_id: &str) -> String {
        format!("{}/{}", Self::users_path(tenant_id, directory_id), encode_segment(user_id))
    }

    pub async fn find_users_by_query(
        &self,
        tenant_id: &str,
        directory_id: &str,
        query: &FindUserQuery,
    ) -> Result<UserProfileSummaryPage, ApiError> {
        let path = format!("{}/query", Self::users_path(tenant_id, directory_id));
        self.api.post(&path, query).await
    }

    pub async fn create(
        &self,
        tenant_id: &str,
        directory_id: &str,
        command: &CreateUserProfileCommand,
    ) -> Result<UserProfile, ApiError> {
        self.api.post(&Self::users_path(tenant_id, directory_id), command).await
    }

    pub async fn get(
        &self,
        tenant_id: &str,
        directory_id: &str,
        user_id: &str,
    ) -> Result<UserProfile, ApiError> {
        self.api.get(&Self::user_path(tenant_id, directory_id, user_id)).await
    }

    /// Replace the profile of an existing user.
    pub async fn update(
        &self,
        tenant_id: &str,
        directory_id: &str,
        user_id: &str,
        command: &CreateUserProfileCommand,
    ) -> Result<UserProfile, ApiError> {
        self.api.put(&Self::user_path(tenant_id, directory_id, user_id), command).await
    }

    pub async fn delete(
        &self,
        tenant_id: &str,
        directory_id: &str,
        user_id: &str,
    ) -> Result<(), ApiError> {
        self.api.delete(&Self::user_path(tenant_id, directory_id, user_id)).await
    }

    pub async fn add_new_email(
        &self,
        tenant_id: &str,
        directory_id: &str,
        user_id: &str,
        command: &AddEmailCommand,
    ) -> Result<EmailAddress, ApiError> {
        let path = format!("{}/emails", Self::user_path(tenant_id, directory_id, user_id));
        self.api.post(&path, command).await
    }

    pub async fn get_email(
        &self,
        tenant_id: &str,
        directory_id: &str,
        user_id: &str,
        email: &str,
    ) -> Result<EmailAddress, ApiError> {
        let path = format!(
            "{}/emails/{}",
            Self::user_path(tenant_id, directory_id, user_id),
            encode_segment(email)
        );
        self.api.get(&path).await
    }

    pub async fn verify_email(
        &self,
        tenant_id: &str,
        directory_id: &str,
        user_id: &str,
        email: &str,
        verification_code: &str,
    ) -> Result<VerificationResult, ApiError> {
        let path = format!(
            "{}/emails/{}/verify",
            Self::user_path(tenant_id, directory_id, user_id),
            encode_segment(email)
        );
        let body = VerifyContactCommand { verification_code: verification_code.to_string() };
        self.api.post(&path, &body).await
    }

    pub async fn add_new_phone(
        &self,
        tenant_id: &str,
        directory_id: &str,
        user_id: &str,
        command: &AddPhoneCommand,
    ) -> Result<PhoneNumber, ApiError> {
        let path = format!("{}/phones", Self::user_path(tenant_id, directory_id, user_id));
        self.api.post(&path, command).await
    }

    pub async fn get_phone(
        &self,
        tenant_id: &str,
        directory_id: &str,
        user_id: &str,
        phone: &str,
    ) -> Result<PhoneNumber, ApiError> {
        let path = format!(
            "{}/phones/{}",
            Self::user_path(tenant_id, directory_id, user_id),
            encode_segment(phone)
        );
        self.api.get(&path).await
    }

    pub async fn verify_phone(
        &self,
        tenant_id: &str,
        directory_id: &str,
        user_id: &str,
        phone: &str,
        verification_code: &str,
    ) -> Result<VerificationResult, ApiError> {
        let path = format!(
            "{}/phones/{}/verify",
            Self::user_path(tenant_id, directory_id, user_id),
            encode_segment(phone)
        );
        let body = VerifyContactCommand { verification_code: verification_code.to_string() };
        self.api.post(&path, &body).await
    }
}
