//! Configuration validation.
//!
//! Collects every violation so one error message lists them all.

use crate::schema::FramelinkConfig;
use framelink_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &FramelinkConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_origin(
        &mut errors,
        "bridge.target_origin",
        &config.bridge.target_origin,
    );

    validate_range(
        &mut errors,
        "frame.fallback_height",
        config.frame.fallback_height,
        0,
        10_000,
    );
    validate_range(
        &mut errors,
        "frame.controls_height",
        config.frame.controls_height,
        0,
        400,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_origin(errors: &mut Vec<String>, name: &str, value: &str) {
    if value == "*" || value == "/" {
        return;
    }
    let has_scheme = value.starts_with("https://") || value.starts_with("http://");
    if !has_scheme || value.ends_with("://") {
        errors.push(format!(
            "{name} = {value:?} must be \"*\", \"/\", or an http(s) origin"
        ));
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
