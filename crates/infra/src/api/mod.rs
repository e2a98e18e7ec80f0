//! REST transport for the Konexus services
//!
//! This module provides the JSON API client every resource sub-client is
//! built on, the bearer-token sources it authenticates with and the error
//! type of a single REST exchange.
//!
//! # Architecture
//!
//! - Uses the shared `HttpClient` (no direct reqwest in sub-clients)
//! - Bearer token from the OAuth client-credentials bootstrap, fetched once
//! - One HTTP call per operation unless the transport opts into retries
//! - Requests and responses logged at `debug` via `tracing`

pub mod auth;
pub mod client;
pub mod errors;
pub mod multipart;

pub use auth::{AccessTokenProvider, ClientCredentialsTokenProvider, StaticToken};
pub use client::{encode_segment, ApiClient, ApiClientConfig, Query};
pub use errors::{ApiError, ApiErrorCategory};
