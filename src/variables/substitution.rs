//! Variable substitution engine.
//!
//! Replaces `$NAME` / `!$NAME` markers in a template with values looked up,
//! name by name along the alias chain, in an ordered list of sources.
//!
//! Resolution order for a placeholder `NAME`:
//! 1. each name in `NAME` followed by its aliases, in order, and for each
//!    name every source in order (caller-supplied values, then environment)
//! 2. optional placeholder: the empty string
//! 3. required placeholder: [`ApiError::MissingRequiredVariable`]
//!
//! Substituted values are inserted literally and never re-scanned.

use super::aliases::{default_aliases, AliasTable};
use super::environment::{ProcessEnv, VariableSource};
use super::placeholder::{tokenize, Placeholder, Token};
use crate::error::ApiError;
use std::collections::HashMap;

/// Resolves placeholders against an ordered list of sources.
pub struct Resolver<'a> {
    aliases: &'a AliasTable,
    sources: Vec<&'a dyn VariableSource>,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver with no sources.
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self {
            aliases,
            sources: Vec::new(),
        }
    }

    /// The resolver used by the request API: `supplied`, then the process
    /// environment, under the default alias table.
    pub fn standard(supplied: &'a HashMap<String, String>) -> Self {
        Self::new(default_aliases())
            .with_source(supplied)
            .with_source(&ProcessEnv)
    }

    /// Appends a source; earlier sources win for the same name.
    pub fn with_source(mut self, source: &'a dyn VariableSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Looks up `name` along its alias chain.
    pub fn lookup(&self, name: &str) -> Option<String> {
        for candidate in self.aliases.chain(name) {
            for source in &self.sources {
                if let Some(value) = source.get(candidate) {
                    if candidate != name {
                        log::debug!("variable {} satisfied by alias {}", name, candidate);
                    }
                    return Some(value);
                }
            }
        }
        None
    }

    /// Resolves a single placeholder.
    pub fn resolve_placeholder(&self, placeholder: &Placeholder<'_>) -> Result<String, ApiError> {
        match self.lookup(placeholder.name) {
            Some(value) => Ok(value),
            None if placeholder.required => Err(ApiError::MissingRequiredVariable(
                placeholder.name.to_string(),
            )),
            None => Ok(String::new()),
        }
    }

    /// Substitutes every placeholder in `template`.
    ///
    /// Fails on the first required placeholder, left to right, that has no value.
    pub fn resolve(&self, template: &str) -> Result<String, ApiError> {
        let tokens = tokenize(template);
        let mut result = String::with_capacity(template.len() + template.len() / 4);

        for token in tokens {
            match token {
                Token::Literal(text) => result.push_str(text),
                Token::Placeholder(placeholder) => {
                    result.push_str(&self.resolve_placeholder(&placeholder)?)
                }
            }
        }

        Ok(result)
    }
}

/// Resolves `template` against `supplied` values and the process environment.
///
/// # Examples
///
/// ```
/// use apicat::variables::resolve;
/// use std::collections::HashMap;
///
/// let mut supplied = HashMap::new();
/// supplied.insert("VAR".to_string(), "foo".to_string());
///
/// let url = resolve("http://localhost/$VAR", &supplied).unwrap();
/// assert_eq!(url, "http://localhost/foo");
/// ```
pub fn resolve(template: &str, supplied: &HashMap<String, String>) -> Result<String, ApiError> {
    Resolver::standard(supplied).resolve(template)
}
