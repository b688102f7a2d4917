//! Alias chains for variable names.
//!
//! An alias lets one canonical name (e.g. `API_KEY`) be satisfied by any of
//! several provider-specific names, so a single template works whether the
//! caller exported `OPENAI_API_KEY` or `OPENROUTER_API_KEY`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Canonical name to ordered alternate names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, Vec<String>>,
}

impl AliasTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the alternates for `canonical`.
    pub fn with_alias<I, S>(mut self, canonical: impl Into<String>, alternates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.insert(
            canonical.into(),
            alternates.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// The alternates registered for `name`, empty if none.
    pub fn alternates_of(&self, name: &str) -> &[String] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `name` followed by its alternates, in lookup order.
    pub fn chain<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        std::iter::once(name).chain(self.alternates_of(name).iter().map(String::as_str))
    }
}

static DEFAULT_ALIASES: Lazy<AliasTable> = Lazy::new(|| {
    AliasTable::new().with_alias("API_KEY", ["OPENAI_API_KEY", "OPENROUTER_API_KEY"])
});

/// The process-wide alias table.
///
/// Only `API_KEY` has alternates.
pub fn default_aliases() -> &'static AliasTable {
    &DEFAULT_ALIASES
}
