//! Request assembly.
//!
//! Turns an [`ApiDefinition`] into a [`ResolvedRequest`] by resolving the URL,
//! each header value and the body, in that order. Header names are copied
//! as written.

use crate::error::ApiError;
use crate::models::{ApiDefinition, ResolvedRequest};
use crate::variables::Resolver;
use std::collections::HashMap;

/// Resolves `definition` against `supplied` values and the process environment.
///
/// # Errors
///
/// The first [`ApiError::MissingRequiredVariable`] met while scanning the URL,
/// then the headers in definition order, then the body.
pub fn build_request(
    definition: &ApiDefinition,
    supplied: &HashMap<String, String>,
) -> Result<ResolvedRequest, ApiError> {
    build_request_with(definition, &Resolver::standard(supplied))
}

/// Resolves `definition` with an explicitly configured resolver.
pub fn build_request_with(
    definition: &ApiDefinition,
    resolver: &Resolver<'_>,
) -> Result<ResolvedRequest, ApiError> {
    let url = resolver.resolve(&definition.url)?;

    let headers = definition
        .headers
        .iter()
        .map(|(name, template)| resolver.resolve(template).map(|value| (name.clone(), value)))
        .collect::<Result<Vec<_>, ApiError>>()?;

    let body = definition
        .body
        .as_deref()
        .map(|template| resolver.resolve(template))
        .transpose()?;

    Ok(ResolvedRequest {
        url,
        method: definition.method,
        headers,
        body,
    })
}
