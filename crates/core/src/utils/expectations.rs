//! Helpers that turn unmet expectations about remote state into errors

use konexus_domain::{KonexusError, Result};

/// Fail with `KonexusError::Expectation` unless `condition` holds.
pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(KonexusError::Expectation(message()))
    }
}

/// Unwrap `value`, failing with `KonexusError::Expectation` when absent.
pub fn require<T>(value: Option<T>, message: impl FnOnce() -> String) -> Result<T> {
    value.ok_or_else(|| KonexusError::Expectation(message()))
}
