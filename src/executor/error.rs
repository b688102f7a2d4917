//! HTTP request execution error types.
//!
//! Transport failures are kept apart from the core [`ApiError`] kinds so a
//! caller can tell "the catalog or variables were wrong" from "the network
//! call failed".

use crate::config::ConfigError;
use crate::error::ApiError;
use thiserror::Error;

/// Errors that can occur while sending a resolved request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Connection failures, DNS errors and other network-level issues.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The request took longer than the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The resolved URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Only `http` and `https` URLs can be sent.
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    /// A resolved header name or value is not valid HTTP.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The HTTP client or request could not be constructed.
    #[error("Request build error: {0}")]
    BuildError(String),
}

/// Maps reqwest's error kinds onto [`RequestError`].
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else if err.is_connect() {
            RequestError::NetworkError(format!("Connection failed: {}", err))
        } else {
            RequestError::NetworkError(err.to_string())
        }
    }
}

impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}

/// Errors returned by [`fetch_api`](super::fetch_api).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Catalog lookup or variable resolution failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Sending the request failed.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Execution settings from the environment are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FetchError {
    /// Returns `true` when the requested API is not in the catalog.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Api(err) if err.is_not_found())
    }
}
