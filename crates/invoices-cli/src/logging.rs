//! Log output for the CLI.
//!
//! Logs go to stderr so that command results on stdout stay machine readable.

use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration for the `invoices` binary
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "warn")
    pub level: String,
    /// Enable JSON structured logging (vs plain text)
    pub json_format: bool,
    /// Environment filter (supports filters like "invoices_validation=debug")
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn new(level: impl Into<String>, json_format: bool) -> Self {
        Self {
            level: level.into(),
            json_format,
            env_filter: None,
        }
    }

    /// Set environment filter
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn directive(&self) -> &str {
        self.env_filter.as_deref().unwrap_or(&self.level)
    }
}

/// Initialize logging; `RUST_LOG` takes precedence over the configured level
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.directive()))?;

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_format {
        registry
            .with(Layer::new().with_writer(io::stderr).json())
            .try_init()?;
    } else {
        registry
            .with(Layer::new().with_writer(io::stderr).with_target(false))
            .try_init()?;
    }

    tracing::debug!(
        level = %config.level,
        format = if config.json_format { "json" } else { "text" },
        "logging initialized"
    );
    Ok(())
}
