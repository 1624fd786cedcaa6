mod cli;
mod logging;
mod rect_selector;
mod stdio;
mod widget;

use std::cell::RefCell;
use std::io::BufRead;
use std::path::Path;
use std::rc::Rc;

use framelink_bridge::{BridgeOptions, ComponentBridge};
use framelink_common::Result;
use framelink_config::FramelinkConfig;

use crate::logging::{FilterSource, LogHandle};
use crate::rect_selector::RectSelector;
use crate::stdio::StdioTransport;
use crate::widget::UserScript;

/// Config for this run. An explicit `--config` must load cleanly; the
/// default location falls back to defaults with a warning.
fn resolve_config(path: Option<&Path>) -> Result<FramelinkConfig> {
    match path {
        Some(path) => {
            tracing::info!("Using config override: {}", path.display());
            Ok(framelink_config::toml_loader::load_from_path(path)?)
        }
        None => Ok(framelink_config::load_config().unwrap_or_else(|e| {
            tracing::warn!("Config load failed, using defaults: {e}");
            FramelinkConfig::default()
        })),
    }
}

fn run(args: cli::Args, log: &LogHandle) -> Result<()> {
    let config = resolve_config(args.config.as_deref())?;
    log.apply_config_level(config.logging.level);
    tracing::info!(
        "Config loaded (target origin: {})",
        config.bridge.target_origin
    );
    tracing::debug!(
        "effective config: {}",
        framelink_config::config_to_json(&config)
    );

    let fallback_height = args
        .fallback_height
        .unwrap_or(config.frame.fallback_height);
    let selector = RectSelector::new(config.frame.controls_height, fallback_height);
    let selector = Rc::new(RefCell::new(selector));

    let transport = StdioTransport::stdout();
    let height_source = Rc::clone(&selector);
    let bridge = Rc::new(ComponentBridge::with_options(
        transport.clone(),
        move || height_source.borrow().content_height(),
        BridgeOptions::with_target_origin(config.bridge.target_origin.clone()),
    ));

    let script = UserScript {
        select: args.select,
        action: args.action,
    };
    widget::mount(&bridge, selector, script);

    let mut delivered = 0usize;
    for line in std::io::stdin().lock().lines() {
        if transport.feed_line(&line?) {
            delivered += 1;
        }
    }

    tracing::info!(delivered, "host closed input, shutting down");
    Ok(())
}

fn main() {
    let args = cli::parse();

    let source = FilterSource::resolve(args.log_level.as_deref(), std::env::var("RUST_LOG").ok());
    let log = logging::init(source);

    tracing::info!("framelink v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args, &log) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framelink_common::FramelinkError;

    #[test]
    fn explicit_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[frame]\ncontrols_height = 9000\n").unwrap();

        let err = resolve_config(Some(&path)).unwrap_err();
        assert!(matches!(err, FramelinkError::Config(_)));
        assert!(err.to_string().contains("config validation error"));
        assert!(err.to_string().contains("frame.controls_height"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = resolve_config(Some(&path)).unwrap_err();
        assert!(matches!(err, FramelinkError::Config(_)));
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_valid_config_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[frame]\ncontrols_height = 80\n").unwrap();

        let config = resolve_config(Some(&path)).unwrap();
        assert_eq!(config.frame.controls_height, 80);
        assert_eq!(config.frame.fallback_height, 150);
    }
}
