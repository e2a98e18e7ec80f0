//! # Konexus Infrastructure
//!
//! HTTP implementations of the `konexus-core` ports.
//!
//! This crate contains:
//! - The pooled HTTP transport with request/response logging
//! - The JSON API client and bearer-token plumbing
//! - Service clients for Directory, Alerting and FileManagement, each split
//!   into resource sub-clients
//! - Adapters implementing the core ports on top of those clients
//! - Configuration loading (environment, `.env`, JSON/TOML files)
//!
//! ## Architecture
//! - Implements traits defined in `konexus-core`
//! - Uses `konexus-common` for the OAuth client-credentials bootstrap
//! - Contains all I/O

pub mod adapters;
pub mod alerting;
pub mod api;
pub mod clients;
pub mod config;
pub mod directory;
pub mod errors;
pub mod file_management;
pub mod http;

// Re-export commonly used items
pub use adapters::{AlertingAdapter, DirectoryAdapter, FileStorageAdapter};
pub use alerting::AlertingClient;
pub use api::{ApiClient, ApiClientConfig, ApiError, ApiErrorCategory};
pub use clients::KonexusClients;
pub use directory::DirectoryClient;
pub use errors::InfraError;
pub use file_management::FileManagementClient;
pub use http::{HttpClient, HttpClientBuilder};
