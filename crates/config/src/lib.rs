//! Configuration loading, validation and env substitution.
//!
//! Config files: `spindle.toml`, `spindle.yaml`, `spindle.yml` or
//! `spindle.json`, searched in `./` then in the user config directory
//! (`~/.config/spindle/` on Linux).
//!
//! Supports `${ENV_VAR}` substitution anywhere in the file.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{config_dir, discover_and_load, find_config_file, load_config},
    schema::{BackendConfig, GraphqlConfig, ServerConfig, SpindleConfig},
    validate::{Diagnostic, Severity, ValidationResult},
};
