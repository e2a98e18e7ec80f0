//! Implementations of the `konexus-core` ports on top of the service
//! clients.

mod alerting;
mod directory;

pub use alerting::{AlertingAdapter, FileStorageAdapter};
pub use directory::DirectoryAdapter;
