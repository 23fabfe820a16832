//! Structured logging through `tracing`.
//!
//! Events always go to stderr so the JSON printed on stdout stays parseable.

use crate::errors::{ContextError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging section of the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error, off
    #[serde(default = "default_level")]
    pub level: String,

    /// text or json
    #[serde(default = "default_format")]
    pub format: String,

    /// Per-module overrides, e.g. `rules_context::providers = "trace"`.
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            modules: BTreeMap::new(),
        }
    }
}

fn invalid(msg: String) -> ContextError {
    ContextError::Config(::config::ConfigError::Message(msg))
}

/// Builds the filter; `RCTX_LOG` overrides everything in the config.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env("RCTX_LOG") {
        return Ok(filter);
    }
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);
    for (module, level) in &config.modules {
        let directive = format!("{module}={level}");
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| invalid(format!("invalid log directive `{directive}`: {e}")))?,
        );
    }
    Ok(filter)
}

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_env_filter(config)?;
    let subscriber = Registry::default().with(filter);

    let installed = match config.format.as_str() {
        "json" => subscriber
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        "text" => subscriber
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        other => {
            return Err(invalid(format!(
                "invalid log format: {other} (must be 'json' or 'text')"
            )))
        }
    };
    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
    Ok(())
}
