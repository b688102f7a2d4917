//! HTTP request execution configuration.

use crate::config::{ConfigError, Settings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters that control how a resolved request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Request timeout in seconds.
    ///
    /// Maximum time to wait for a complete response (including connection,
    /// headers, and body download).
    pub timeout_secs: u64,

    /// `User-Agent` used when the definition does not send its own.
    pub user_agent: String,
}

impl ExecutionConfig {
    /// Creates a config with the given timeout and the default user agent.
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout_secs,
            ..Self::from(&Settings::default())
        }
    }

    /// Builds the config from environment-provided [`Settings`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Settings::from_env().map(|settings| Self::from(&settings))
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for ExecutionConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            timeout_secs: settings.timeout_secs,
            user_agent: settings.user_agent.clone(),
        }
    }
}
