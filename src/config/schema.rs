//! Settings schema.
//!
//! Defines the user-configurable settings and their validation rules.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime settings for request execution.
///
/// Missing values fall back to the defaults below. The catalog location is
/// not a setting; discovery reads `APICAT_CONFIG` itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Request timeout in seconds.
    ///
    /// Covers connection, headers and body download. Must be greater than 0.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` sent when a definition does not set one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Settings {
    /// Validates the settings.
    ///
    /// Returns `Err` with a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeoutSecs must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("userAgent must not be empty".to_string());
        }

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("apicat/{}", env!("CARGO_PKG_VERSION"))
}
