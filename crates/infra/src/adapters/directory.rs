//! `DirectoryPort` over the Directory REST client

use async_trait::async_trait;
use konexus_core::DirectoryPort;
use konexus_domain::{
    AddEmailCommand, AvailableLanguagesResponse, AvailableTimeZonesResponse,
    CreateUserProfileCommand, DirectoryScope, EmailAddress, FindUserQuery, GroupSummary,
    PendingVerification, PhoneNumber, Result, UserProfile, UserProfileSummary, VerificationResult,
};

use crate::directory::DirectoryClient;

#[derive(Debug, Clone)]
pub struct DirectoryAdapter {
    client: DirectoryClient,
}

impl DirectoryAdapter {
    pub fn new(client: DirectoryClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DirectoryClient {
        &self.client
    }
}

#[async_trait]
impl DirectoryPort for DirectoryAdapter {
    async fn find_users(
        &self,
        scope: &DirectoryScope,
        query: &FindUserQuery,
    ) -> Result<Vec<UserProfileSummary>> {
        let page = self
            .client
            .users()
            .find_users_by_query(&scope.tenant_id, &scope.directory_id, query)
            .await?;
        Ok(page.items)
    }

    async fn time_zones(&self, realm_id: &str) -> Result<AvailableTimeZonesResponse> {
        Ok(self.client.meta().get_time_zones(realm_id).await?)
    }

    async fn languages(&self, realm_id: &str) -> Result<AvailableLanguagesResponse> {
        Ok(self.client.meta().get_languages(realm_id).await?)
    }

    async fn discover_groups(&self, scope: &DirectoryScope) -> Result<Vec<GroupSummary>> {
        let page =
            self.client.groups().discover_groups(&scope.tenant_id, &scope.directory_id).await?;
        Ok(page.items)
    }

    async fn create_user(
        &self,
        scope: &DirectoryScope,
        command: &CreateUserProfileCommand,
    ) -> Result<UserProfile> {
        Ok(self.client.users().create(&scope.tenant_id, &scope.directory_id, command).await?)
    }

    async fn update_user(
        &self,
        scope: &DirectoryScope,
        user_id: &str,
        command: &CreateUserProfileCommand,
    ) -> Result<UserProfile> {
        Ok(self
            .client
            .users()
            .update(&scope.tenant_id, &scope.directory_id, user_id, command)
            .await?)
    }

    async fn add_email(
        &self,
        scope: &DirectoryScope,
        user_id: &str,
        command: &AddEmailCommand,
    ) -> Result<EmailAddress> {
        Ok(self
            .client
            .users()
            .add_new_email(&scope.tenant_id, &scope.directory_id, user_id, command)
            .await?)
    }

    async fn get_email(
        &self,
        scope: &DirectoryScope,
        user_id: &str,
        email: &str,
    ) -> Result<EmailAddress> {
        Ok(self
            .client
            .users()
            .get_email(&scope.tenant_id, &scope.directory_id, user_id, email)
            .await?)
    }

    async fn verify_email(
        &self,
        scope: &DirectoryScope,
        user_id: &str,
        email: &str,
        code: &str,
    ) -> Result<VerificationResult> {
        Ok(self
            .client
            .users()
            .verify_email(&scope.tenant_id, &scope.directory_id, user_id, email, code)
            .await?)
    }

    async fn get_phone(
        &self,
        scope: &DirectoryScope,
        user_id: &str,
        phone: &str,
    ) -> Result<PhoneNumber> {
        Ok(self
            .client
            .users()
            .get_phone(&scope.tenant_id, &scope.directory_id, user_id, phone)
            .await?)
    }

    async fn verify_phone(
        &self,
        scope: &DirectoryScope,
        user_id: &str,
        phone: &str,
        code: &str,
    ) -> Result<VerificationResult> {
        Ok(self
            .client
            .users()
            .verify_phone(&scope.tenant_id, &scope.directory_id, user_id, phone, code)
            .await?)
    }

    async fn pending_email_verification(&self, email: &str) -> Result<Option<PendingVerification>> {
        Ok(self.client.test().get_pending_email_verification(email).await?)
    }

    async fn pending_phone_verification(&self, phone: &str) -> Result<Option<PendingVerification>> {
        Ok(self.client.test().get_pending_phone_verification(phone).await?)
    }
}
