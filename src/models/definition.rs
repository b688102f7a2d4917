//! API definition data model.
//!
//! An [`ApiDefinition`] is one row of a catalog: a named, templated HTTP call
//! whose URL, header values and body may contain placeholders.

use serde::{Deserialize, Serialize};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
        }
    }

    /// Parses a method name, ignoring case.
    ///
    /// Returns `None` for anything that is not a supported method.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "HEAD" => Some(HttpMethod::HEAD),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One named API call from a catalog.
///
/// `(service, name)` is unique within a catalog. Definitions are never mutated
/// after parsing; resolving one produces a separate
/// [`ResolvedRequest`](crate::models::ResolvedRequest).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDefinition {
    /// Namespace the API belongs to, e.g. `openai`.
    pub service: String,

    /// Name of the API within its service, e.g. `chat`.
    pub name: String,

    /// URL template.
    pub url: String,

    /// HTTP method to issue.
    pub method: HttpMethod,

    /// Header name to value template, in catalog order.
    ///
    /// Only the values are templated; names are sent as written.
    pub headers: Vec<(String, String)>,

    /// Body template, or `None` when the catalog row has no body.
    pub body: Option<String>,

    /// Line in the catalog source where this definition was read (1-based).
    #[serde(default)]
    pub line: usize,
}

impl ApiDefinition {
    /// Creates a definition with no headers and no body.
    pub fn new(
        service: impl Into<String>,
        name: impl Into<String>,
        method: HttpMethod,
        url: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            name: name.into(),
            url: url.into(),
            method,
            headers: Vec::new(),
            body: None,
            line: 0,
        }
    }

    /// The `service.name` identifier used by listings and the CLI.
    pub fn id(&self) -> String {
        format!("{}.{}", self.service, self.name)
    }

    /// Returns the header value template for `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
