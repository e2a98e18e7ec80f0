//! OpenID Connect discovery
//!
//! Fetches `{authority}/.well-known/openid-configuration` and checks the
//! document against a [`DiscoveryPolicy`] before its token endpoint is used.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::{Host, Url};

use super::error::AuthError;

const WELL_KNOWN_PATH: &str = ".well-known/openid-configuration";

/// Subset of the discovery document used by the client-credentials flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub token_endpoint: Option<String>,
    #[serde(default)]
    pub jwks_uri: Option<String>,
    #[serde(default)]
    pub grant_types_supported: Vec<String>,
    #[serde(default)]
    pub scopes_supported: Vec<String>,
}

/// Checks applied to the authority and the discovery document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryPolicy {
    /// Authority and endpoints must use HTTPS
    pub require_https: bool,
    /// Plain HTTP is accepted for `localhost` and loopback addresses
    pub allow_http_on_loopback: bool,
    /// `issuer` must equal the authority (trailing slash and case ignored)
    pub validate_issuer_name: bool,
    /// Token endpoint must live on the authority's origin
    pub validate_endpoints: bool,
}

impl Default for DiscoveryPolicy {
    fn default() -> Self {
        Self {
            require_https: true,
            allow_http_on_loopback: true,
            validate_issuer_name: true,
            validate_endpoints: true,
        }
    }
}

impl DiscoveryPolicy {
    /// Policy with every check disabled.
    pub fn permissive() -> Self {
        Self {
            require_https: false,
            allow_http_on_loopback: true,
            validate_issuer_name: false,
            validate_endpoints: false,
        }
    }

    fn check_scheme(&self, url: &Url, what: &str) -> Result<(), AuthError> {
        if !self.require_https || url.scheme() == "https" {
            return Ok(());
        }
        if self.allow_http_on_loopback && url.scheme() == "http" && is_loopback(url) {
            return Ok(());
        }
        Err(AuthError::Discovery(format!("{what} must use HTTPS: {url}")))
    }

    /// Validate a fetched document and return its token endpoint.
    ///
    /// # Errors
    /// Returns `AuthError::Discovery` describing the first failed check.
    pub fn validate(&self, authority: &str, document: &DiscoveryDocument) -> Result<Url, AuthError> {
        let authority_url = parse_url(authority, "authority")?;
        self.check_scheme(&authority_url, "authority")?;

        if self.validate_issuer_name {
            let issuer = document
                .issuer
                .as_deref()
                .ok_or_else(|| AuthError::Discovery("discovery document has no issuer".into()))?;
            if !issuer.trim_end_matches('/').eq_ignore_ascii_case(authority.trim_end_matches('/'))
            {
                return Err(AuthError::Discovery(format!(
                    "issuer name does not match authority: {issuer}"
                )));
            }
        }

        let token_endpoint = document
            .token_endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.is_empty())
            .ok_or_else(|| {
                AuthError::Discovery("discovery document has no token_endpoint".into())
            })?;
        let token_url = parse_url(token_endpoint, "token endpoint")?;
        self.check_scheme(&token_url, "token endpoint")?;

        if self.validate_endpoints && token_url.origin() != authority_url.origin() {
            return Err(AuthError::Discovery(format!(
                "token endpoint is not on the authority: {token_url}"
            )));
        }

        Ok(token_url)
    }
}

/// Discovery document URL for an authority.
///
/// An authority that already points at the well-known document is used as is.
pub fn discovery_url(authority: &str) -> String {
    let trimmed = authority.trim_end_matches('/');
    if trimmed.ends_with(WELL_KNOWN_PATH) {
        trimmed.to_string()
    } else {
        format!("{trimmed}/{WELL_KNOWN_PATH}")
    }
}

/// Authority with any well-known suffix removed.
pub fn normalize_authority(authority: &str) -> &str {
    let trimmed = authority.trim_end_matches('/');
    trimmed.strip_suffix(WELL_KNOWN_PATH).map_or(trimmed, |base| base.trim_end_matches('/'))
}

/// Fetch the discovery document for `authority`.
///
/// # Errors
/// Returns `AuthError::Discovery` when the request fails, the status is not
/// 2xx, or the body is not a discovery document.
pub async fn fetch_document(client: &Client, authority: &str) -> Result<DiscoveryDocument, AuthError> {
    let url = discovery_url(authority);
    debug!(%url, "fetching discovery document");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|err| AuthError::Discovery(format!("error connecting to {url}: {err}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| AuthError::Discovery(format!("error reading {url}: {err}")))?;

    if !status.is_success() {
        warn!(%url, %status, "discovery endpoint returned an error");
        return Err(AuthError::Discovery(format!("error connecting to {url}: {status} {body}")));
    }

    serde_json::from_str(&body)
        .map_err(|err| AuthError::Discovery(format!("invalid discovery document at {url}: {err}")))
}

fn parse_url(value: &str, what: &str) -> Result<Url, AuthError> {
    Url::parse(value).map_err(|err| AuthError::Discovery(format!("invalid {what} URL {value}: {err}")))
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
