//! Subscriber setup. The subscriber goes up before config is read, so config
//! load warnings are visible; the config's level is applied afterwards
//! through a reload handle unless `--log-level` or `RUST_LOG` decided it.

use framelink_config::LogLevel;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

/// Where the active filter directive comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSource {
    Cli(String),
    Env(String),
    Config,
}

impl FilterSource {
    /// `--log-level` beats `RUST_LOG` beats the config file. An empty
    /// `RUST_LOG` counts as unset.
    pub fn resolve(cli: Option<&str>, rust_log: Option<String>) -> Self {
        if let Some(directive) = cli {
            return Self::Cli(directive.to_string());
        }
        match rust_log {
            Some(directive) if !directive.trim().is_empty() => Self::Env(directive),
            _ => Self::Config,
        }
    }

    fn initial_directive(&self) -> &str {
        match self {
            Self::Cli(directive) | Self::Env(directive) => directive,
            Self::Config => LogLevel::default().directive(),
        }
    }
}

pub struct LogHandle {
    source: FilterSource,
    reload: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Switch to the config's level if nothing more specific was given.
    pub fn apply_config_level(&self, level: LogLevel) {
        if self.source != FilterSource::Config {
            return;
        }
        if let Err(e) = self.reload.reload(EnvFilter::new(level.directive())) {
            tracing::warn!("failed to apply configured log level: {e}");
        }
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries the wire.
pub fn init(source: FilterSource) -> LogHandle {
    let (filter, handle) = reload::Layer::new(EnvFilter::new(source.initial_directive()));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    LogHandle {
        source,
        reload: handle,
    }
}
