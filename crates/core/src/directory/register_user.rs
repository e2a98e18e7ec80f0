//! User registration and contact verification
//!
//! Creates a user, verifies every email and phone with the code the test
//! API exposes, then updates the same user and verifies a secondary email.

use std::sync::Arc;

use konexus_domain::{
    AddEmailCommand, Address, AvailableLanguagesResponse, AvailableTimeZonesResponse,
    ContactTargetType, CreateEmailAddress, CreateGroupMembership, CreateLocation,
    CreatePhoneNumber, CreateUserProfileCommand, DirectoryScope, EmailAddress, FindUserQuery,
    GroupSummary, PhoneNumber, Result, UserProfile, UserProfileSummary,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::ports::DirectoryPort;
use crate::utils::{ensure, require};

const FIRST_NAME: &str = "John";
const LAST_NAME: &str = "Dough";
const WORK_PHONE: &str = "+12081112222";
const PREFERRED_TIME_ZONE: &str = "Mountain";
const PREFERRED_LANGUAGE: &str = "English";

/// Throwaway address for a user that does not exist yet.
pub fn generate_test_email() -> String {
    format!("test-{}@nagdom.com", Uuid::new_v4()).to_lowercase()
}

/// Result of a full registration run
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationOutcome {
    pub user: UserProfile,
    pub secondary_email: EmailAddress,
}

/// Metadata and groups the profile is built from
#[derive(Debug, Clone)]
struct DirectoryCatalog {
    time_zones: AvailableTimeZonesResponse,
    languages: AvailableLanguagesResponse,
    groups: Vec<GroupSummary>,
}

pub struct RegisterUserUseCase {
    directory: Arc<dyn DirectoryPort>,
    scope: DirectoryScope,
}

impl RegisterUserUseCase {
    pub fn new(directory: Arc<dyn DirectoryPort>, scope: DirectoryScope) -> Self {
        Self { directory, scope }
    }

    pub fn scope(&self) -> &DirectoryScope {
        &self.scope
    }

    /// Create then update a user for `email`.
    pub async fn run(&self, email: &str) -> Result<RegistrationOutcome> {
        self.create_user_flow(email).await?;
        self.update_user_flow(email).await
    }

    /// Register a brand-new user and verify all of its contact points.
    ///
    /// Fails with an expectation error if a user already owns `email`.
    #[instrument(skip(self), fields(tenant = %self.scope.tenant_id))]
    pub async fn create_user_flow(&self, email: &str) -> Result<UserProfile> {
        let existing = self.find_existing_users(email).await?;
        ensure(existing.is_empty(), || {
            format!("Unable to create a new User, there is already an existing user for {email}")
        })?;

        let catalog = self.discover_catalog().await?;
        let command = build_profile(email, &catalog);

        let profile = self.directory.create_user(&self.scope, &command).await?;
        info!(user_id = %profile.id, "user created");

        for address in &profile.contact_information.emails {
            ensure(!address.verification.verified, || {
                format!("Email {} is already verified on a new user", address.value)
            })?;
            self.verify_email_with_code(&profile.id, address).await?;
        }

        for phone in &profile.contact_information.phones {
            ensure(!phone.verification.verified, || {
                format!("Phone {} is already verified on a new user", phone.value)
            })?;
            self.verify_phone_with_code(&profile.id, phone).await?;
        }

        let locations = require(profile.notification_preferences.locations.as_ref(), || {
            format!("User {} has no notification locations", profile.id)
        })?;
        for location in locations {
            ensure(location.geo_location.is_some(), || "Location was not geocoded.".to_string())?;
        }

        Ok(profile)
    }

    /// Update the existing user for `email` and verify a secondary address.
    ///
    /// Fails with an expectation error if no user owns `email`.
    #[instrument(skip(self), fields(tenant = %self.scope.tenant_id))]
    pub async fn update_user_flow(&self, email: &str) -> Result<RegistrationOutcome> {
        let existing = self.find_existing_users(email).await?;
        let current = require(existing.into_iter().next(), || {
            format!("Unable to edit existing User, there is no matching user for {email}")
        })?;

        let catalog = self.discover_catalog().await?;
        let command = build_profile(email, &catalog);

        let user = self.directory.update_user(&self.scope, &current.id, &command).await?;
        info!(user_id = %user.id, "user updated");

        let secondary = AddEmailCommand {
            target_type: ContactTargetType::Work,
            label: None,
            value: format!("second_{email}"),
            is_primary: false,
        };
        let secondary_email = self.directory.add_email(&self.scope, &user.id, &secondary).await?;
        ensure(!secondary_email.verification.verified, || {
            format!("Secondary email {} is already verified", secondary_email.value)
        })?;
        self.verify_email_with_code(&user.id, &secondary_email).await?;

        Ok(RegistrationOutcome { user, secondary_email })
    }

    async fn find_existing_users(&self, email: &str) -> Result<Vec<UserProfileSummary>> {
        self.directory.find_users(&self.scope, &FindUserQuery::by_email(email)).await
    }

    async fn discover_catalog(&self) -> Result<DirectoryCatalog> {
        let time_zones = self.directory.time_zones(&self.scope.realm_id).await?;
        let languages = self.directory.languages(&self.scope.realm_id).await?;
        let groups = self.directory.discover_groups(&self.scope).await?;
        debug!(
            time_zones = time_zones.time_zones.len(),
            groups = groups.len(),
            "directory catalog loaded"
        );
        Ok(DirectoryCatalog { time_zones, languages, groups })
    }

    async fn verify_email_with_code(&self, user_id: &str, email: &EmailAddress) -> Result<()> {
        let pending = require(self.directory.pending_email_verification(&email.value).await?, || {
            format!("A pending verification code was not found for {}", email.value)
        })?;

        let result = self
            .directory
            .verify_email(&self.scope, user_id, &email.value, &pending.verification_code)
            .await?;
        ensure(result.success, || format!("Verification of {} was rejected", email.value))?;

        let details = self.directory.get_email(&self.scope, user_id, &email.value).await?;
        ensure(details.verification.verified, || {
            format!("Email {} is not verified after verification", email.value)
        })?;

        debug!(email = %email.value, "email verified");
        Ok(())
    }

    async fn verify_phone_with_code(&self, user_id: &str, phone: &PhoneNumber) -> Result<()> {
        let pending = require(self.directory.pending_phone_verification(&phone.value).await?, || {
            format!("A pending verification code was not found for {}", phone.value)
        })?;

        let result = self
            .directory
            .verify_phone(&self.scope, user_id, &phone.value, &pending.verification_code)
            .await?;
        ensure(result.success, || format!("Verification of {} was rejected", phone.value))?;

        let details = self.directory.get_phone(&self.scope, user_id, &phone.value).await?;
        ensure(details.verification.verified, || {
            format!("Phone {} is not verified after verification", phone.value)
        })?;

        debug!(phone = %phone.value, "phone verified");
        Ok(())
    }
}

/// Users can only join groups without children.
fn group_memberships(groups: &[GroupSummary]) -> Vec<CreateGroupMembership> {
    groups
        .iter()
        .filter(|group| group.is_joinable())
        .map(|group| CreateGroupMembership { group_id: group.id.clone() })
        .collect()
}

fn build_profile(email: &str, catalog: &DirectoryCatalog) -> CreateUserProfileCommand {
    let timezone = catalog
        .time_zones
        .time_zones
        .iter()
        .find(|zone| zone.standard_name.contains(PREFERRED_TIME_ZONE))
        .map(|zone| zone.id.clone());
    let spoken = catalog
        .languages
        .spoken_languages
        .iter()
        .find(|lang| lang.value.starts_with(PREFERRED_LANGUAGE))
        .map(|lang| lang.value.clone());
    let written = catalog
        .languages
        .written_languages
        .iter()
        .find(|lang| lang.value.starts_with(PREFERRED_LANGUAGE))
        .map(|lang| lang.value.clone());

    CreateUserProfileCommand {
        first_name: FIRST_NAME.to_string(),
        last_name: LAST_NAME.to_string(),
        display_name: None,
        preferred_written_language: written,
        preferred_spoken_language: spoken,
        locale: None,
        timezone,
        emails: vec![CreateEmailAddress {
            target_type: ContactTargetType::Work,
            is_primary: true,
            value: email.to_string(),
        }],
        phones: vec![CreatePhoneNumber {
            target_type: ContactTargetType::Work,
            is_primary: true,
            value: WORK_PHONE.to_string(),
        }],
        locations: vec![CreateLocation {
            address: Address {
                name: "Personal".to_string(),
                care_of: None,
                street: "1234 W North St".to_string(),
                city: "City".to_string(),
                state: "State".to_string(),
                postal_code: "012345".to_string(),
                country: "US".to_string(),
            },
        }],
        memberships: group_memberships(&catalog.groups),
    }
}
