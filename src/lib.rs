//! apicat: a declarative HTTP API catalog.
//!
//! A catalog is a table of named API calls whose URL, header values and body
//! are templates. Resolving a definition substitutes every placeholder and
//! yields a [`ResolvedRequest`] that can be sent as-is.
//!
//! # Architecture
//!
//! - **catalog**: parses catalog text, discovers the catalog file, looks APIs up
//! - **variables**: placeholder scanning, alias chains and the resolver
//! - **assembler**: applies the resolver to a definition
//! - **models**: API definitions, resolved requests and responses
//! - **config**: settings read from the environment
//! - **executor**: sends resolved requests with reqwest (`http` feature)
//! - **commands**: the `apicat` command surface (`http` feature)
//!
//! # Templates
//!
//! `$NAME` is an optional placeholder and becomes the empty string when no
//! value is found. `!$NAME` is required and fails with
//! [`ApiError::MissingRequiredVariable`]. Values come from the caller first,
//! then from the process environment, trying the name's aliases in order
//! (`API_KEY` may be satisfied by `OPENAI_API_KEY` or `OPENROUTER_API_KEY`).
//!
//! # Usage
//!
//! ```
//! use apicat::get_request;
//! use std::collections::HashMap;
//!
//! let mut vars = HashMap::new();
//! vars.insert("API_KEY".to_string(), "test-key".to_string());
//! vars.insert("MODEL".to_string(), "gpt-4".to_string());
//! vars.insert("PROMPT".to_string(), "hi".to_string());
//!
//! let request = get_request("openai", "chat", &vars, None).unwrap();
//! assert_eq!(request.header("Authorization"), Some("Bearer test-key"));
//! ```

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod variables;

#[cfg(feature = "http")]
pub mod commands;
#[cfg(feature = "http")]
pub mod executor;

pub use assembler::{build_request, build_request_with};
pub use catalog::{load_catalog, parse_catalog, Catalog, CatalogSource};
pub use error::ApiError;
pub use models::{ApiDefinition, ApiResponse, HttpMethod, ResolvedRequest};

#[cfg(feature = "http")]
pub use executor::{fetch_api, FetchError, FetchOptions, FetchOutput};

use std::collections::HashMap;
use std::path::Path;

/// All definitions of the catalog at `path` (or the discovered catalog), in file order.
pub fn get_apis(path: Option<&Path>) -> Result<Vec<ApiDefinition>, ApiError> {
    Ok(load_catalog(path)?.into_apis())
}

/// The definition named `service.name`.
///
/// # Errors
///
/// [`ApiError::NotFound`] when the catalog has no such pair, plus any
/// catalog loading error.
pub fn get_api(service: &str, name: &str, path: Option<&Path>) -> Result<ApiDefinition, ApiError> {
    load_catalog(path)?.get(service, name).cloned()
}

/// Looks up `service.name` and resolves it against `vars` and the environment.
///
/// # Errors
///
/// [`ApiError::NotFound`] for unknown APIs and
/// [`ApiError::MissingRequiredVariable`] when a `!$NAME` has no value.
pub fn get_request(
    service: &str,
    name: &str,
    vars: &HashMap<String, String>,
    path: Option<&Path>,
) -> Result<ResolvedRequest, ApiError> {
    let definition = get_api(service, name, path)?;
    build_request(&definition, vars)
}
