//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FramelinkConfig {
    pub bridge: BridgeSection,
    pub frame: FrameSection,
    pub logging: LoggingSection,
}

/// Outbound channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSection {
    /// `targetOrigin` passed with every outbound message. `*` posts to any
    /// origin, `/` to the widget's own origin, otherwise an `http(s)://` origin.
    pub target_origin: String,
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            target_origin: "*".to_string(),
        }
    }
}

/// Frame sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSection {
    /// Content height reported when no explicit height is given and no
    /// document is available (valid range: 0-10000).
    pub fallback_height: u32,
    /// Height of the widget controls below the canvas (valid range: 0-400).
    pub controls_height: u32,
}

impl Default for FrameSection {
    fn default() -> Self {
        Self {
            fallback_height: 150,
            controls_height: 60,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing_subscriber::EnvFilter` directive for the framelink crates.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "framelink=trace",
            LogLevel::Debug => "framelink=debug",
            LogLevel::Info => "framelink=info",
            LogLevel::Warn => "framelink=warn",
            LogLevel::Error => "framelink=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_all_defaults() {
        let config: FramelinkConfig = toml::from_str("").unwrap();
        assert_eq!(config.bridge.target_origin, "*");
        assert_eq!(config.frame.fallback_height, 150);
        assert_eq!(config.frame.controls_height, 60);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn log_level_parses_lowercase() {
        let config: FramelinkConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.level.directive(), "framelink=debug");
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let result: Result<FramelinkConfig, _> = toml::from_str("[logging]\nlevel = \"loud\"\n");
        assert!(result.is_err());
    }
}
