//! # Konexus Domain
//!
//! Data-transfer records and shared types for the Konexus API clients.
//!
//! This crate contains:
//! - Request/response records for the Alerting, Directory and
//!   FileManagement services
//! - GeoJSON records used for geofenced alerts
//! - The domain error type and `Result` alias
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Konexus crates
//! - No I/O beyond reading a local file into an upload
//! - Records mirror the remote JSON schemas (camelCase on the wire)

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
