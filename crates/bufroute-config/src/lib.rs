//! Shared configuration for the bufroute router and its dispatch adapter.
//!
//! Configuration is layered by `ortho_config`: defaults, then a TOML file
//! passed via `--config-path`, then `BUFROUTE_*` environment variables, then
//! command-line flags. The scheme is the only required value; every router
//! instance owns exactly one scheme and refuses to start without it.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_PREFIX, default_log_filter, default_log_filter_string,
    default_log_format, default_prefix, default_prefix_string,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Router configuration shared by the core and the dispatch adapter.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, OrthoConfig)]
#[ortho_config(prefix = "BUFROUTE")]
pub struct Config {
    /// Scheme owned by the router, e.g. `gitui` in `gitui://status`.
    pub scheme: String,
    /// Prefix applied uniformly to remotely callable operation names.
    #[serde(default = "default_prefix_string")]
    #[ortho_config(default = default_prefix_string())]
    pub prefix: String,
    /// `tracing` filter expression.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log events.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheme: String::new(),
            prefix: default_prefix_string(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Builds a configuration for the given scheme with default settings.
    #[must_use]
    pub fn for_scheme(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            ..Self::default()
        }
    }

    /// Scheme owned by the router.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Operation-name prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Checks the values `ortho_config` cannot express as types.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyScheme`] when the scheme is blank and
    /// [`ConfigError::InvalidPrefix`] when the prefix is blank or contains
    /// whitespace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheme.trim().is_empty() {
            return Err(ConfigError::EmptyScheme);
        }
        if self.prefix.is_empty() || self.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidPrefix {
                prefix: self.prefix.clone(),
            });
        }
        Ok(())
    }
}

/// Errors raised when a loaded configuration is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The scheme was missing or blank.
    #[error("scheme must not be empty")]
    EmptyScheme,
    /// The operation prefix was blank or contained whitespace.
    #[error("invalid operation prefix '{prefix}'")]
    InvalidPrefix { prefix: String },
}
