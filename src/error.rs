//! Error types for catalog loading, lookup and variable resolution.
//!
//! Every variant here is a deterministic failure of the core: the same catalog
//! text, supplied values and environment always produce the same error.
//! Transport failures live in [`crate::executor::RequestError`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the catalog parser, catalog lookup and the resolver.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A catalog line could not be turned into an API definition.
    ///
    /// Aborts the whole catalog load.
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// Line number in the catalog source (1-based)
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// No definition matches the requested `(service, name)` pair.
    #[error("Unknown API: {service}.{name}")]
    NotFound { service: String, name: String },

    /// A required placeholder (`!$NAME`) had no value in any source.
    #[error("Variable {0} is required")]
    MissingRequiredVariable(String),

    /// The catalog file could not be read.
    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ApiError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(service: &str, name: &str) -> Self {
        ApiError::NotFound {
            service: service.to_string(),
            name: name.to_string(),
        }
    }

    /// Returns `true` for lookup misses, which the CLI maps to exit code 1.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
