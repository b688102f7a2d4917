//! Configuration management.
//!
//! Settings are read from the process environment and merged with defaults:
//!
//! - `APICAT_TIMEOUT_SECS`: request timeout in seconds
//! - `APICAT_USER_AGENT`: default `User-Agent`
//!
//! `APICAT_CONFIG` names the catalog file. It is read only by catalog
//! discovery, through [`env_catalog_path`].

pub mod schema;

pub use schema::Settings;

use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming the catalog file.
pub const CATALOG_PATH_ENV: &str = "APICAT_CONFIG";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "APICAT_TIMEOUT_SECS";

/// Environment variable overriding the default `User-Agent`.
pub const USER_AGENT_ENV: &str = "APICAT_USER_AGENT";

/// Errors raised while building [`Settings`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be used.
    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: String,
        value: String,
        reason: String,
    },

    /// The merged settings failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// The catalog path from `APICAT_CONFIG`, if set.
pub fn env_catalog_path() -> Option<PathBuf> {
    non_empty_env(CATALOG_PATH_ENV).map(PathBuf::from)
}

impl Settings {
    /// Builds settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable cannot be parsed or the result
    /// fails [`Settings::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        if let Some(raw) = non_empty_env(TIMEOUT_ENV) {
            settings.timeout_secs =
                raw.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                        var: TIMEOUT_ENV.to_string(),
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?;
        }

        if let Some(agent) = non_empty_env(USER_AGENT_ENV) {
            settings.user_agent = agent;
        }

        settings.validate().map_err(ConfigError::Invalid)?;
        Ok(settings)
    }
}
