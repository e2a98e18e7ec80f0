//! Configuration loading
//!
//! Builds a [`konexus_domain::KonexusConfig`] from environment variables
//! (optionally seeded from a `.env` file) or a JSON/TOML file.

pub mod loader;

// Re-export commonly used items
pub use loader::{
    apply_credential_overrides, load, load_from_env, load_from_file, load_from_vars,
    probe_config_paths,
};
