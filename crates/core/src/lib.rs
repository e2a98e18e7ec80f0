//! # Konexus Core
//!
//! Use-case orchestration over the Konexus services - no HTTP code.
//!
//! This crate contains:
//! - Port interfaces (traits) for the Directory, Alerting and
//!   FileManagement services
//! - Use cases that drive those ports through end-to-end scenarios
//!
//! ## Architecture Principles
//! - Only depends on `konexus-domain`
//! - All remote calls go through traits implemented in `konexus-infra`
//! - Calls are awaited one after another; no use case runs requests
//!   concurrently

pub mod alerting;
pub mod directory;
pub mod utils;

pub use alerting::ports::{AlertingPort, FileStoragePort};
pub use alerting::{
    AlertOutcome, SendAlertWithAttachmentUseCase, SendAlertWithPolygonUseCase,
};
pub use directory::ports::DirectoryPort;
pub use directory::{generate_test_email, RegisterUserUseCase, RegistrationOutcome};
