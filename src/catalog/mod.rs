//! API catalog: parsing, discovery and lookup.
//!
//! A [`Catalog`] is the immutable result of parsing one catalog source. It is
//! re-read on every call to the top-level API because each call may name a
//! different source.

pub mod loader;
pub mod parser;

pub use loader::{load_catalog, resolve_catalog_source, CatalogSource, BUILTIN_CATALOG};
pub use parser::parse_catalog;

use crate::error::ApiError;
use crate::models::ApiDefinition;

/// Splits a `service.name` identifier at the first `.`.
///
/// An id without a `.` is all service and an empty name, which matches
/// nothing.
pub fn split_id(id: &str) -> (&str, &str) {
    id.split_once('.').unwrap_or((id, ""))
}

/// The parsed definitions of one catalog source, in file order.
#[derive(Debug, Clone)]
pub struct Catalog {
    source: CatalogSource,
    apis: Vec<ApiDefinition>,
}

impl Catalog {
    pub fn new(source: CatalogSource, apis: Vec<ApiDefinition>) -> Self {
        Self { source, apis }
    }

    /// Parses `text` as a catalog read from `source`.
    pub fn parse(source: CatalogSource, text: &str) -> Result<Self, ApiError> {
        Ok(Self::new(source, parse_catalog(text)?))
    }

    /// Where this catalog was read from.
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// All definitions, in file order.
    pub fn apis(&self) -> &[ApiDefinition] {
        &self.apis
    }

    pub fn into_apis(self) -> Vec<ApiDefinition> {
        self.apis
    }

    /// Exact lookup by service and name.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when no definition matches.
    pub fn get(&self, service: &str, name: &str) -> Result<&ApiDefinition, ApiError> {
        self.apis
            .iter()
            .find(|api| api.service == service && api.name == name)
            .ok_or_else(|| ApiError::not_found(service, name))
    }

    /// Lookup by `service.name` identifier, split with [`split_id`].
    pub fn find(&self, id: &str) -> Result<&ApiDefinition, ApiError> {
        let (service, name) = split_id(id);
        self.get(service, name)
    }

    /// Definitions whose `service.name` contains `pattern` (case-sensitive).
    ///
    /// An empty pattern matches everything.
    pub fn matching<'a>(&'a self, pattern: &'a str) -> impl Iterator<Item = &'a ApiDefinition> + 'a {
        self.apis
            .iter()
            .filter(move |api| api.id().contains(pattern))
    }
}
