//! Common utilities shared across Konexus crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: error types and serde records
//! - `observability`: tracing subscriber setup
//! - `platform`: OAuth 2.0 client-credentials bootstrap (discovery + token
//!   exchange)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Observability tier
// ---------------------------------------------------------------
#[cfg(feature = "observability")]
pub mod observability;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod auth;

// Re-export commonly used types for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use auth::{AuthError, ClientCredentials, ClientCredentialsAuthenticator, TokenSet};
