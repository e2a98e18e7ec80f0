//! In-memory Directory
//!
//! Issues a verification code for every new email and phone and only marks
//! the contact verified when that code comes back.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use konexus_core::DirectoryPort;
use konexus_domain::{
    AddEmailCommand, AvailableLanguagesResponse, AvailableTimeZonesResponse, ContactInformation,
    CreateUserProfileCommand, DirectoryScope, EmailAddress, FindUserQuery, GeoLocation,
    GroupSummary, KonexusError, LanguageOption, Location, NotificationPreferences,
    PendingVerification, PhoneNumber, Result, TimeZoneOption, UserProfile, UserProfileSummary,
    Verification, VerificationResult,
};

#[derive(Default)]
struct State {
    users: Vec<UserProfile>,
    pending: HashMap<String, String>,
    next_code: u32,
    calls: Vec<String>,
    last_command: Option<CreateUserProfileCommand>,
}

pub struct FakeDirectory {
    state: Mutex<State>,
    /// Geocode new locations
    geocode: bool,
    /// Expose pending codes through the test API
    expose_codes: bool,
}

impl Default for FakeDirectory {
    fn default() -> Self {
        Self { state: Mutex::new(State::default()), geocode: true, expose_codes: true }
    }
}

fn unverified() -> Verification {
    Verification { verified: false, verified_on: None }
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_codes() -> Self {
        Self { expose_codes: false, ..Self::default() }
    }

    pub fn without_geocoding() -> Self {
        Self { geocode: false, ..Self::default() }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn users(&self) -> Vec<UserProfile> {
        self.state.lock().unwrap().users.clone()
    }

    pub fn last_command(&self) -> Option<CreateUserProfileCommand> {
        self.state.lock().unwrap().last_command.clone()
    }

    fn record(&self, call: &str) -> std::sync::MutexGuard<'_, State> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.to_string());
        state
    }

    fn issue_code(state: &mut State, contact: &str) {
        state.next_code += 1;
        let code = format!("{:06}", state.next_code);
        state.pending.insert(contact.to_string(), code);
    }

    fn apply(&self, state: &mut State, id: String, command: &CreateUserProfileCommand) -> UserProfile {
        let emails = command
            .emails
            .iter()
            .map(|email| EmailAddress {
                value: email.value.clone(),
                target_type: Some(email.target_type),
                is_primary: email.is_primary,
                verification: unverified(),
            })
            .collect::<Vec<_>>();
        let phones = command
            .phones
            .iter()
            .map(|phone| PhoneNumber {
                value: phone.value.clone(),
                target_type: Some(phone.target_type),
                is_primary: phone.is_primary,
                verification: unverified(),
            })
            .collect::<Vec<_>>();
        let locations = command
            .locations
            .iter()
            .map(|location| Location {
                id: None,
                address: Some(location.address.clone()),
                geo_location: self
                    .geocode
                    .then_some(GeoLocation { latitude: 43.6, longitude: -116.3 }),
            })
            .collect();

        for contact in emails.iter().map(|e| &e.value).chain(phones.iter().map(|p| &p.value)) {
            Self::issue_code(state, contact);
        }

        state.last_command = Some(command.clone());
        UserProfile {
            id,
            first_name: Some(command.first_name.clone()),
            last_name: Some(command.last_name.clone()),
            display_name: command.display_name.clone(),
            contact_information: ContactInformation { emails, phones },
            notification_preferences: NotificationPreferences { locations: Some(locations) },
            extra: Default::default(),
        }
    }

    fn user_mut<'a>(state: &'a mut State, user_id: &str) -> Result<&'a mut UserProfile> {
        state
            .users
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or_else(|| KonexusError::NotFound(format!("user {user_id}")))
    }

    fn verify(state: &mut State, contact: &str, code: &str) -> bool {
        let matches = state.pending.get(contact).is_some_and(|pending| pending == code);
        if matches {
            state.pending.remove(contact);
        }
        matches
    }
}

#[async_trait]
impl DirectoryPort for FakeDirectory {
    async fn find_users(
        &self,
        _scope: &DirectoryScope,
        query: &FindUserQuery,
    ) -> Result<Vec<UserProfileSummary>> {
        let state = self.record("find_users");
        let email = query.email.clone().unwrap_or_default();
        Ok(state
            .users
            .iter()
            .filter(|user| user.contact_information.emails.iter().any(|e| e.value == email))
            .map(|user| UserProfileSummary {
                id: user.id.clone(),
                display_name: user.display_name.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                primary_email: Some(email.clone()),
            })
            .collect())
    }

    async fn time_zones(&self, _realm_id: &str) -> Result<AvailableTimeZonesResponse> {
        self.record("time_zones");
        Ok(AvailableTimeZonesResponse {
            time_zones: vec![TimeZoneOption {
                id: "America/Denver".into(),
                standard_name: "Mountain Standard Time".into(),
                display_name: None,
            }],
        })
    }

    async fn languages(&self, _realm_id: &str) -> Result<AvailableLanguagesResponse> {
        self.record("languages");
        let english = LanguageOption { value: "English".into(), display_name: None };
        Ok(AvailableLanguagesResponse {
            spoken_languages: vec![english.clone()],
            written_languages: vec![english],
        })
    }

    async fn discover_groups(&self, _scope: &DirectoryScope) -> Result<Vec<GroupSummary>> {
        self.record("discover_groups");
        Ok(vec![
            GroupSummary { id: "g-leaf".into(), name: Some("Residents".into()), children: None },
            GroupSummary {
                id: "g-parent".into(),
                name: Some("County".into()),
                children: Some(vec![GroupSummary { id: "g-child".into(), name: None, children: None }]),
            },
        ])
    }

    async fn create_user(
        &self,
        _scope: &DirectoryScope,
        command: &CreateUserProfileCommand,
    ) -> Result<UserProfile> {
        let mut state = self.record("create_user");
        let id = format!("user-{}", state.users.len() + 1);
        let profile = self.apply(&mut state, id, command);
        state.users.push(profile.clone());
        Ok(profile)
    }

    async fn update_user(
        &self,
        _scope: &DirectoryScope,
        user_id: &str,
        command: &CreateUserProfileCommand,
    ) -> Result<UserProfile> {
        let mut state = self.record("update_user");
        Self::user_mut(&mut state, user_id)?;
        let profile = self.apply(&mut state, user_id.to_string(), command);
        *Self::user_mut(&mut state, user_id)? = profile.clone();
        Ok(profile)
    }

    async fn add_email(
        &self,
        _scope: &DirectoryScope,
        user_id: &str,
        command: &AddEmailCommand,
    ) -> Result<EmailAddress> {
        let mut state = self.record("add_email");
        let email = EmailAddress {
            value: command.value.clone(),
            target_type: Some(command.target_type),
            is_primary: command.is_primary,
            verification: unverified(),
        };
        Self::user_mut(&mut state, user_id)?.contact_information.emails.push(email.clone());
        Self::issue_code(&mut state, &command.value);
        Ok(email)
    }

    async fn get_email(&self, _scope: &DirectoryScope, user_id: &str, email: &str) -> Result<EmailAddress> {
        let mut state = self.record("get_email");
        Self::user_mut(&mut state, user_id)?
            .contact_information
            .emails
            .iter()
            .find(|e| e.value == email)
            .cloned()
            .ok_or_else(|| KonexusError::NotFound(email.to_string()))
    }

    async fn verify_email(
        &self,
        _scope: &DirectoryScope,
        user_id: &str,
        email: &str,
        code: &str,
    ) -> Result<VerificationResult> {
        let mut state = self.record("verify_email");
        let success = Self::verify(&mut state, email, code);
        if success {
            for entry in &mut Self::user_mut(&mut state, user_id)?.contact_information.emails {
                if entry.value == email {
                    entry.verification.verified = true;
                }
            }
        }
        Ok(VerificationResult { success, message: None })
    }

    async fn get_phone(&self, _scope: &DirectoryScope, user_id: &str, phone: &str) -> Result<PhoneNumber> {
        let mut state = self.record("get_phone");
        Self::user_mut(&mut state, user_id)?
            .contact_information
            .phones
            .iter()
            .find(|p| p.value == phone)
            .cloned()
            .ok_or_else(|| KonexusError::NotFound(phone.to_string()))
    }

    async fn verify_phone(
        &self,
        _scope: &DirectoryScope,
        user_id: &str,
        phone: &str,
        code: &str,
    ) -> Result<VerificationResult> {
        let mut state = self.record("verify_phone");
        let success = Self::verify(&mut state, phone, code);
        if success {
            for entry in &mut Self::user_mut(&mut state, user_id)?.contact_information.phones {
                if entry.value == phone {
                    entry.verification.verified = true;
                }
            }
        }
        Ok(VerificationResult { success, message: None })
    }

    async fn pending_email_verification(&self, email: &str) -> Result<Option<PendingVerification>> {
        let state = self.record("pending_email_verification");
        Ok(self.expose_codes.then(|| state.pending.get(email)).flatten().map(|code| {
            PendingVerification { value: email.to_string(), verification_code: code.clone(), expires_on: None }
        }))
    }

    async fn pending_phone_verification(&self, phone: &str) -> Result<Option<PendingVerification>> {
        let state = self.record("pending_phone_verification");
        Ok(self.expose_codes.then(|| state.pending.get(phone)).flatten().map(|code| {
            PendingVerification { value: phone.to_string(), verification_code: code.clone(), expires_on: None }
        }))
    }
}
