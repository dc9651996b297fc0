//! Configuration management for SensorWatch
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `SENSORWATCH__SECTION__KEY` environment variables. Alert thresholds are fixed
//! algorithm parameters and are not configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alerting::ATTENTION_WINDOW;
use crate::error::{Error, Result};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "SENSORWATCH";

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ingest configuration
    pub ingest: IngestConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            debug!(path = %path.display(), "Reading configuration file");
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check settings that deserialize fine but cannot work
    pub fn validate(&self) -> Result<()> {
        if self.ingest.history_limit < ATTENTION_WINDOW {
            return Err(Error::config(format!(
                "ingest.history_limit must be at least {ATTENTION_WINDOW}, got {}",
                self.ingest.history_limit
            )));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(Error::config(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{other}\""
            ))),
        }
    }
}

/// Ingest configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Newest readings kept per sensor before evaluation
    pub history_limit: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            history_limit: ATTENTION_WINDOW,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json or pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
