//! Resolved HTTP request model.
//!
//! A [`ResolvedRequest`] is what the request assembler produces from an
//! [`ApiDefinition`](super::ApiDefinition): every placeholder substituted,
//! ready to hand to the executor.

use super::HttpMethod;
use serde::{Deserialize, Serialize};

/// A fully substituted, executable HTTP request.
///
/// Created fresh for every resolution and owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRequest {
    /// Target URL with all placeholders substituted.
    pub url: String,

    /// HTTP method, copied from the definition.
    pub method: HttpMethod,

    /// Request headers in definition order.
    pub headers: Vec<(String, String)>,

    /// Request body, if the definition has one.
    pub body: Option<String>,
}

impl ResolvedRequest {
    /// Gets a header value by name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(|b| !b.is_empty())
    }

    /// Parses the body as JSON.
    ///
    /// Returns `None` when there is no body or it is not valid JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
    }
}
