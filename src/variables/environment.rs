//! Variable sources.
//!
//! A [`VariableSource`] answers "does this name have a value?". The resolver
//! queries an ordered list of sources, so caller-supplied values and the
//! process environment are interchangeable in tests.

use std::collections::{BTreeMap, HashMap};

/// Something that can supply a value for a variable name.
pub trait VariableSource {
    /// Returns the value for `name`, or `None` if this source does not define it.
    fn get(&self, name: &str) -> Option<String>;
}

impl VariableSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl VariableSource for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        BTreeMap::get(self, name).cloned()
    }
}

/// Reads variables from the process environment.
///
/// Variables that are set to an empty string count as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VariableSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}
