//! Shared test helpers for `konexus-core` integration tests.
//!
//! In-memory fakes of the service ports so the use cases can be exercised
//! without HTTP.

#![allow(dead_code)]

pub mod alerting;
pub mod directory;
