//! OAuth 2.0 client-credentials bootstrap
//!
//! Service clients authenticate as a machine client: no user, no browser, no
//! refresh token. The flow is:
//!
//! ```text
//! ClientCredentials ──► discovery   GET {authority}/.well-known/openid-configuration
//!                           │
//!                           ▼
//!                       token_endpoint
//!                           │
//!                           ▼
//!                   POST grant_type=client_credentials ──► TokenSet
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use konexus_common::auth::{ClientCredentials, ClientCredentialsAuthenticator};
//!
//! # async fn example() -> Result<(), konexus_common::auth::AuthError> {
//! let credentials = ClientCredentials::new(
//!     "https://auth.example.com",
//!     "my-client",
//!     "my-secret",
//!     "tamarack content",
//! );
//!
//! let authenticator = ClientCredentialsAuthenticator::new()?;
//! let tokens = authenticator.authenticate(&credentials).await?;
//! assert!(!tokens.access_token.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: credentials, token set, token endpoint payloads
//! - **[`discovery`]**: discovery document fetch and validation policy
//! - **[`client`]**: the authenticator tying discovery and token exchange
//! - **[`error`]**: `AuthError`

pub mod client;
pub mod discovery;
pub mod error;
pub mod types;

pub use client::ClientCredentialsAuthenticator;
pub use discovery::{DiscoveryDocument, DiscoveryPolicy};
pub use error::AuthError;
pub use types::{ClientCredentials, OAuthError, TokenResponse, TokenSet};
