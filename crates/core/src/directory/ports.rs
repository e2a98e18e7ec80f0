//! Port interface for the Directory service

use async_trait::async_trait;
use konexus_domain::{
    AddEmailCommand, AvailableLanguagesResponse, AvailableTimeZonesResponse,
    CreateUserProfileCommand, DirectoryScope, EmailAddress, FindUserQuery, GroupSummary,
    PendingVerification, PhoneNumber, Result, UserProfile, UserProfileSummary, VerificationResult,
};

/// User, metadata, group and verification operations of the Directory
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    async fn find_users(
        &self,
        scope: &DirectoryScope,
        query: &FindUserQuery,
    ) -> Result<Vec<UserProfileSummary>>;

    async fn time_zones(&self, realm_id: &str) -> Result<AvailableTimeZonesResponse>;

    async fn languages(&self, realm_id: &str) -> Result<AvailableLanguagesResponse>;

    /// Groups a user may be offered for membership
    async fn discover_groups(&self, scope: &DirectoryScope) -> Result<Vec<GroupSummary>>;

    async fn create_user(
        &self,
        scope: &DirectoryScope,
        command: &CreateUserProfileCommand,
    ) -> Result<UserProfile>;

    /// Replace an existing user's profile
    async fn update_user(
        &self,
        scope: &DirectoryScope,
        user_id: &str,
        command: &CreateUserProfileCommand,
    ) -> Result<UserProfile>;

    async fn add_email(
        &self,
        scope: &DirectoryScope,
        user_id: &str,
        command: &AddEmailCommand,
    ) -> Result<EmailAddress>;

    async fn get_email(&self, scope: &DirectoryScope, user_id: &str, email: &str)
        -> Result<EmailAddress>;

    async fn verify_email(
        &self,
        scope: &DirectoryScope,
        user_id: &str,
        email: &str,
        code: &str,
    ) -> Result<VerificationResult>;

    async fn get_phone(&self, scope: &DirectoryScope, user_id: &str, phone: &str)
        -> Result<PhoneNumber>;

    async fn verify_phone(
        &self,
        scope: &DirectoryScope,
        user_id: &str,
        phone: &str,
        code: &str,
    ) -> Result<VerificationResult>;

    /// Pending code for an email address (test API); `None` if there is none
    async fn pending_email_verification(&self, email: &str) -> Result<Option<PendingVerification>>;

    /// Pending code for a phone number (test API); `None` if there is none
    async fn pending_phone_verification(&self, phone: &str) -> Result<Option<PendingVerification>>;
}
