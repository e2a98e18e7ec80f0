//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Loads a `.env` file from the working directory (if present)
//! 2. If every required variable is set, loads from the environment alone;
//!    a malformed value is an error, not a reason to fall back
//! 3. Otherwise falls back to a config file (JSON or TOML), probing
//!    multiple paths
//!
//! `CLIENT_ID` and `CLIENT_SECRET` in the environment override (or fill in)
//! the credentials found in a file; validation runs after the override.
//!
//! ## Environment Variables
//! - `CLIENT_ID`, `CLIENT_SECRET`: OAuth client credentials
//! - `KONEXUS_AUTHORITY_URL`: identity provider base URL
//! - `KONEXUS_DIRECTORY_URL`, `KONEXUS_ALERTING_URL`, `KONEXUS_FILES_URL`:
//!   service base URLs
//! - `KONEXUS_DIRECTORY_SCOPES`, `KONEXUS_ALERTING_SCOPES`,
//!   `KONEXUS_FILES_SCOPES`: optional scope overrides
//! - `KONEXUS_HTTP_TIMEOUT_SECS`, `KONEXUS_HTTP_MAX_ATTEMPTS`: optional
//!   transport settings
//! - `KONEXUS_TENANT_ID`, `KONEXUS_DIRECTORY_ID`, `KONEXUS_REALM_ID`,
//!   `KONEXUS_ALERTING_TENANT_ID`: optional tenant identifiers
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./konexus.{json,toml}` then `./config.{json,toml}`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use konexus_domain::{
    AuthSettings, HttpSettings, KonexusConfig, KonexusError, Result, ServiceEndpoint,
    TenantSettings,
};

const CONFIG_FILE_NAMES: [&str; 4] = ["konexus.json", "konexus.toml", "config.json", "config.toml"];

const REQUIRED_VARS: [&str; 6] = [
    "KONEXUS_AUTHORITY_URL",
    "CLIENT_ID",
    "CLIENT_SECRET",
    "KONEXUS_DIRECTORY_URL",
    "KONEXUS_ALERTING_URL",
    "KONEXUS_FILES_URL",
];

/// Load configuration with automatic fallback strategy
///
/// Reads `.env` first, then tries environment variables. If any required
/// variable is missing, falls back to a config file.
///
/// # Errors
/// Returns `KonexusError::Config` if:
/// - An environment value is malformed
/// - The environment is incomplete and no config file is found
/// - File format is invalid
/// - Required fields are missing after credential overrides
pub fn load() -> Result<KonexusConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to read .env file"),
    }

    load_with(env_lookup, None)
}

/// Environment first, then `path` (or the probed locations) with
/// credential overrides from `lookup`.
fn load_with<F>(lookup: F, path: Option<PathBuf>) -> Result<KonexusConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let missing = missing_vars(&lookup);
    if missing.is_empty() {
        let config = load_from_vars(lookup)?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    tracing::debug!(missing = ?missing, "Environment incomplete, trying config file");
    let config_path = match path {
        Some(path) => path,
        None => probe_config_paths().ok_or_else(|| {
            KonexusError::Config(format!(
                "No config file found in any of the standard locations and the environment is missing: {}",
                missing.join(", ")
            ))
        })?,
    };

    let config = apply_credential_overrides(read_config_file(&config_path)?, &lookup);
    validate(&config)?;
    Ok(config)
}

/// Required variables that are unset or blank.
fn missing_vars<F>(lookup: &F) -> Vec<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    REQUIRED_VARS
        .into_iter()
        .filter(|key| lookup(key).map_or(true, |value| value.trim().is_empty()))
        .collect()
}

/// Load configuration from process environment variables
///
/// # Errors
/// Returns `KonexusError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<KonexusConfig> {
    load_from_vars(env_lookup)
}

/// Load configuration from an arbitrary variable source
///
/// `lookup` returns the value of a variable, or `None` when unset.
///
/// # Errors
/// Same as [`load_from_env`].
pub fn load_from_vars<F>(lookup: F) -> Result<KonexusConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| {
        lookup(key).filter(|value| !value.trim().is_empty()).ok_or_else(|| {
            KonexusError::Config(format!("Missing required environment variable: {key}"))
        })
    };

    let auth = AuthSettings {
        authority_url: required("KONEXUS_AUTHORITY_URL")?,
        client_id: required("CLIENT_ID")?,
        client_secret: required("CLIENT_SECRET")?,
    };
    let endpoint = |url_key: &str, scopes_key: &str| -> Result<ServiceEndpoint> {
        Ok(ServiceEndpoint { base_url: required(url_key)?, scopes: lookup(scopes_key) })
    };

    let defaults = HttpSettings::default();
    let http = HttpSettings {
        timeout_secs: parse_optional(&lookup, "KONEXUS_HTTP_TIMEOUT_SECS")?
            .unwrap_or(defaults.timeout_secs),
        max_attempts: parse_optional(&lookup, "KONEXUS_HTTP_MAX_ATTEMPTS")?
            .unwrap_or(defaults.max_attempts),
    };

    let defaults = TenantSettings::default();
    let tenant = TenantSettings {
        directory_tenant_id: lookup("KONEXUS_TENANT_ID").unwrap_or(defaults.directory_tenant_id),
        directory_id: lookup("KONEXUS_DIRECTORY_ID").unwrap_or(defaults.directory_id),
        realm_id: lookup("KONEXUS_REALM_ID").unwrap_or(defaults.realm_id),
        alerting_tenant_id: parse_optional(&lookup, "KONEXUS_ALERTING_TENANT_ID")?
            .unwrap_or(defaults.alerting_tenant_id),
    };

    let config = KonexusConfig {
        auth,
        directory: endpoint("KONEXUS_DIRECTORY_URL", "KONEXUS_DIRECTORY_SCOPES")?,
        alerting: endpoint("KONEXUS_ALERTING_URL", "KONEXUS_ALERTING_SCOPES")?,
        files: endpoint("KONEXUS_FILES_URL", "KONEXUS_FILES_SCOPES")?,
        http,
        tenant,
    };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `KonexusError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing or empty
pub fn load_from_file(path: Option<PathBuf>) -> Result<KonexusConfig> {
    let config_path = match path {
        Some(p) => p,
        None => probe_config_paths().ok_or_else(|| {
            KonexusError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    let config = read_config_file(&config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Read and parse a config file without validating it.
fn read_config_file(path: &Path) -> Result<KonexusConfig> {
    if !path.exists() {
        return Err(KonexusError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| KonexusError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

/// Replace file credentials with `CLIENT_ID` / `CLIENT_SECRET` when set.
pub fn apply_credential_overrides<F>(mut config: KonexusConfig, lookup: F) -> KonexusConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(id) = lookup("CLIENT_ID").filter(|v| !v.trim().is_empty()) {
        config.auth.client_id = id;
    }
    if let Some(secret) = lookup("CLIENT_SECRET").filter(|v| !v.trim().is_empty()) {
        config.auth.client_secret = secret;
    }
    config
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<KonexusConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| KonexusError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| KonexusError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(KonexusError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Every credential and base URL must be non-empty.
fn validate(config: &KonexusConfig) -> Result<()> {
    let fields = [
        ("auth.authority_url", &config.auth.authority_url),
        ("auth.client_id", &config.auth.client_id),
        ("auth.client_secret", &config.auth.client_secret),
        ("directory.base_url", &config.directory.base_url),
        ("alerting.base_url", &config.alerting.base_url),
        ("files.base_url", &config.files.base_url),
    ];

    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(KonexusError::Config(format!("{name} must not be empty"))),
        None => Ok(()),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_optional<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| KonexusError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
