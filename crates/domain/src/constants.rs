//! Domain constants
//!
//! Defaults shared by the configuration layer and the use cases.

// OAuth scopes requested per service
pub const DIRECTORY_DEFAULT_SCOPES: &str = "tamarack content";
pub const ALERTING_DEFAULT_SCOPES: &str = "tamarack";
pub const FILE_MANAGEMENT_DEFAULT_SCOPES: &str = "tamarack";

// HTTP defaults
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_MAX_ATTEMPTS: usize = 1;

// Tenant defaults used by the sample flows
pub const DEFAULT_DIRECTORY_TENANT_ID: &str = "3331";
pub const DEFAULT_DIRECTORY_ID: &str = "public";
pub const DEFAULT_REALM_ID: &str = "civicready";
pub const DEFAULT_ALERTING_TENANT_ID: i64 = 1211;

// Fallback content type for uploads with an unknown extension
pub const OCTET_STREAM: &str = "application/octet-stream";
