//! TOML config file loading and creation.

use crate::schema::{FramelinkConfig, CONFIG_SCHEMA_VERSION};
use crate::validation;
use framelink_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load and validate config from a specific TOML file path.
///
/// Missing fields take serde defaults. A config that fails validation is
/// returned as `ConfigError::ValidationError`; callers decide whether to fall
/// back to defaults.
pub fn load_from_path(path: &Path) -> Result<FramelinkConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let config: FramelinkConfig = toml::from_str(&content).map_err(|e| {
        ConfigError::ParseError(format!("failed to parse TOML: {e}"))
    })?;

    validation::validate(&config)?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/framelink/config.toml`
/// On macOS: `~/Library/Application Support/framelink/config.toml`
///
/// If the file does not exist, a commented default is written and the
/// defaults are returned.
pub fn load_default() -> Result<FramelinkConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(FramelinkConfig::default());
    }

    load_from_path(&path)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        ConfigError::ParseError("could not determine config directory".into())
    })?;
    Ok(config_dir.join("framelink").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

fn default_config_toml() -> String {
    format!(
        r#"# Framelink Configuration
# Schema version {CONFIG_SCHEMA_VERSION}
# Only override what you want to change -- missing fields use defaults.

[bridge]
# target_origin = "*"        # "*", "/", or e.g. "http://localhost:8501"

[frame]
# fallback_height = 150      # 0-10000
# controls_height = 60       # 0-400

[logging]
# level = "info"             # trace, debug, info, warn, error
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LogLevel;

    #[test]
    fn load_from_nonexistent_returns_file_not_found() {
        let result = load_from_path(Path::new("/tmp/nonexistent_framelink_config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn load_valid_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[bridge]
target_origin = "http://localhost:8501"

[logging]
level = "warn"
"#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.bridge.target_origin, "http://localhost:8501");
        assert_eq!(config.logging.level, LogLevel::Warn);
        // Defaults preserved
        assert_eq!(config.frame.fallback_height, 150);
    }

    #[test]
    fn load_invalid_toml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        let result = load_from_path(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn load_config_with_invalid_values_returns_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[frame]\ncontrols_height = 9000\n").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("frame.controls_height = 9000"));
    }

    #[test]
    fn default_config_names_schema_version() {
        assert!(default_config_toml().contains("# Schema version 1\n"));
    }

    #[test]
    fn created_default_config_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        create_default_config(&path).unwrap();
        assert!(path.exists());

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.bridge.target_origin, "*");
        assert_eq!(config.logging.level, LogLevel::Info);
    }
}
