//! Request and response records for the remote services
//!
//! Records read from a service and sent back to it (alert settings, file
//! models, user profiles) keep unknown JSON fields in a flattened `extra`
//! map so a read-modify-write does not drop data this crate does not model.

pub mod alerting;
pub mod directory;
pub mod files;
pub mod geojson;
pub mod response;

pub use alerting::*;
pub use directory::*;
pub use files::*;
pub use geojson::*;
pub use response::*;

/// Unmodelled JSON fields carried through a round trip.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;
