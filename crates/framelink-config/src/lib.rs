//! Framelink configuration.
//!
//! TOML-based configuration for the bridge and the host simulator. Every
//! section uses serde defaults so a partial file (or no file) works.
//!
//! ```rust,no_run
//! use framelink_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{FramelinkConfig, LogLevel, CONFIG_SCHEMA_VERSION};

use framelink_common::ConfigError;

/// Load config from the platform default path, creating it if missing.
///
/// An existing file that fails validation is an error.
pub fn load_config() -> Result<FramelinkConfig, ConfigError> {
    toml_loader::load_default()
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &FramelinkConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
