//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events; binaries and tests decide where
//! they go by calling one of the initialisers below once.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "info,konexus=debug";

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install a `fmt` subscriber; `RUST_LOG` overrides `default_directive`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default_directive: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Same as [`init_tracing`] but emits one JSON object per event.
pub fn init_json_tracing(default_directive: &str) -> bool {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(default_directive))
        .try_init()
        .is_ok()
}

/// Subscriber for tests: output is captured by the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("debug"))
        .with_test_writer()
        .try_init();
}
