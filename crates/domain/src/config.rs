//! Configuration structures
//!
//! Loaded by `konexus-infra::config` from the environment or a JSON/TOML
//! file. Every field that has a sensible default carries it so a file only
//! needs the credentials and base URLs.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ALERTING_DEFAULT_SCOPES, DEFAULT_ALERTING_TENANT_ID, DEFAULT_DIRECTORY_ID,
    DEFAULT_DIRECTORY_TENANT_ID, DEFAULT_HTTP_MAX_ATTEMPTS, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_REALM_ID, DIRECTORY_DEFAULT_SCOPES, FILE_MANAGEMENT_DEFAULT_SCOPES,
};

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KonexusConfig {
    pub auth: AuthSettings,
    pub directory: ServiceEndpoint,
    pub alerting: ServiceEndpoint,
    pub files: ServiceEndpoint,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub tenant: TenantSettings,
}

impl KonexusConfig {
    /// Scopes requested for the Directory service.
    pub fn directory_scopes(&self) -> &str {
        self.directory.scopes_or(DIRECTORY_DEFAULT_SCOPES)
    }

    /// Scopes requested for the Alerting service.
    pub fn alerting_scopes(&self) -> &str {
        self.alerting.scopes_or(ALERTING_DEFAULT_SCOPES)
    }

    /// Scopes requested for the FileManagement service.
    pub fn files_scopes(&self) -> &str {
        self.files.scopes_or(FILE_MANAGEMENT_DEFAULT_SCOPES)
    }
}

/// Identity provider and client credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Identity provider base URL (the discovery document lives below it)
    pub authority_url: String,
    /// May be left out of a file and supplied through `CLIENT_ID`
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

// Keeps the secret out of logs
impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("authority_url", &self.authority_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Base URL and optional scope override for one remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<String>,
}

impl ServiceEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), scopes: None }
    }

    /// Configured scopes, or `default` when none (or only whitespace) is set.
    pub fn scopes_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.scopes.as_deref() {
            Some(scopes) if !scopes.trim().is_empty() => scopes,
            _ => default,
        }
    }
}

/// Transport settings shared by every service client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total attempts per request (1 = no retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: default_timeout_secs(), max_attempts: default_max_attempts() }
    }
}

/// Tenant identifiers used by the use-case flows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSettings {
    #[serde(default = "default_directory_tenant")]
    pub directory_tenant_id: String,
    #[serde(default = "default_directory_id")]
    pub directory_id: String,
    #[serde(default = "default_realm_id")]
    pub realm_id: String,
    /// Tenant used by the Alerting and FileManagement services
    #[serde(default = "default_alerting_tenant")]
    pub alerting_tenant_id: i64,
}

impl Default for TenantSettings {
    fn default() -> Self {
        Self {
            directory_tenant_id: default_directory_tenant(),
            directory_id: default_directory_id(),
            realm_id: default_realm_id(),
            alerting_tenant_id: default_alerting_tenant(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_max_attempts() -> usize {
    DEFAULT_HTTP_MAX_ATTEMPTS
}

fn default_directory_tenant() -> String {
    DEFAULT_DIRECTORY_TENANT_ID.to_string()
}

fn default_directory_id() -> String {
    DEFAULT_DIRECTORY_ID.to_string()
}

fn default_realm_id() -> String {
    DEFAULT_REALM_ID.to_string()
}

fn default_alerting_tenant() -> i64 {
    DEFAULT_ALERTING_TENANT_ID
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> &'static str {
        r#"{
            "auth": {
                "authority_url": "https://auth.example.com",
                "client_id": "client",
                "client_secret": "secret"
            },
            "directory": { "base_url": "https://directory.example.com" },
            "alerting": { "base_url": "https://alerting.example.com/api", "scopes": "tamarack alerts" },
            "files": { "base_url": "https://files.example.com" }
        }"#
    }

    #[test]
    fn defaults_fill_optional_sections() {
        let config: KonexusConfig = serde_json::from_str(minimal_json()).unwrap();

        assert_eq!(config.http, HttpSettings::default());
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(config.http.max_attempts, 1);
        assert_eq!(config.tenant.directory_tenant_id, "3331");
        assert_eq!(config.tenant.directory_id, "public");
        assert_eq!(config.tenant.realm_id, "civicready");
        assert_eq!(config.tenant.alerting_tenant_id, 1211);
    }

    #[test]
    fn scope_overrides_fall_back_to_service_defaults() {
        let config: KonexusConfig = serde_json::from_str(minimal_json()).unwrap();

        assert_eq!(config.directory_scopes(), "tamarack content");
        assert_eq!(config.alerting_scopes(), "tamarack alerts");
        assert_eq!(config.files_scopes(), "tamarack");

        let blank = ServiceEndpoint { base_url: "x".into(), scopes: Some("  ".into()) };
        assert_eq!(blank.scopes_or("fallback"), "fallback");
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config: KonexusConfig = serde_json::from_str(minimal_json()).unwrap();
        let rendered = format!("{:?}", config.auth);

        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("secret\""));
    }
}
