//! Catalog file discovery and loading.
//!
//! The catalog source is chosen in this order:
//! 1. an explicit path passed by the caller
//! 2. the `APICAT_CONFIG` environment variable
//! 3. `apis.tsv` in the current directory or up to 3 parent directories
//! 4. `apicat/apis.tsv` in the user configuration directory
//! 5. the catalog compiled into the crate

use super::parser::parse_catalog;
use super::Catalog;
use crate::config::env_catalog_path;
use crate::error::ApiError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for in the working directory and its parents.
pub const CATALOG_FILE_NAME: &str = "apis.tsv";

/// Directory under the user configuration directory holding a catalog.
const CONFIG_DIR_NAME: &str = "apicat";

/// Maximum number of parent directories to search
const MAX_PARENT_SEARCH_DEPTH: usize = 3;

/// Catalog shipped with the crate, used when no file is found.
pub const BUILTIN_CATALOG: &str = include_str!("../../apis.tsv");

/// Where a catalog is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A catalog file on disk.
    File(PathBuf),
    /// [`BUILTIN_CATALOG`].
    BuiltIn,
}

impl CatalogSource {
    /// Reads the catalog text.
    pub fn read(&self) -> Result<String, ApiError> {
        match self {
            CatalogSource::File(path) => fs::read_to_string(path).map_err(|source| ApiError::Io {
                path: path.clone(),
                source,
            }),
            CatalogSource::BuiltIn => Ok(BUILTIN_CATALOG.to_string()),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::BuiltIn => write!(f, "<built-in>"),
        }
    }
}

/// Picks the catalog source for `explicit`, falling back through discovery.
///
/// Never fails: when nothing is found the built-in catalog is used. An
/// explicit or `APICAT_CONFIG` path is returned even if it does not exist,
/// so reading it reports the missing file.
pub fn resolve_catalog_source(explicit: Option<&Path>) -> CatalogSource {
    let cwd = std::env::current_dir().ok();
    let user_config = dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME));
    discover(
        explicit,
        env_catalog_path(),
        cwd.as_deref(),
        user_config.as_deref(),
    )
}

/// Discovery with every input passed in.
pub(crate) fn discover(
    explicit: Option<&Path>,
    env_path: Option<PathBuf>,
    start_dir: Option<&Path>,
    user_config_dir: Option<&Path>,
) -> CatalogSource {
    if let Some(path) = explicit {
        return CatalogSource::File(path.to_path_buf());
    }

    if let Some(path) = env_path {
        return CatalogSource::File(path);
    }

    if let Some(path) = start_dir.and_then(find_catalog_file) {
        return CatalogSource::File(path);
    }

    if let Some(dir) = user_config_dir {
        let candidate = dir.join(CATALOG_FILE_NAME);
        if candidate.is_file() {
            return CatalogSource::File(candidate);
        }
    }

    CatalogSource::BuiltIn
}

/// Finds the catalog file by searching `start` and its parent directories.
fn find_catalog_file(start: &Path) -> Option<PathBuf> {
    let mut current_path = start.to_path_buf();

    for _ in 0..=MAX_PARENT_SEARCH_DEPTH {
        let candidate = current_path.join(CATALOG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current_path.parent() {
            Some(parent) => current_path = parent.to_path_buf(),
            None => break,
        }
    }

    None
}

/// Resolves, reads and parses a catalog.
pub fn load_catalog(explicit: Option<&Path>) -> Result<Catalog, ApiError> {
    let source = resolve_catalog_source(explicit);
    load_from(source)
}

/// Reads and parses the catalog at `source`.
pub fn load_from(source: CatalogSource) -> Result<Catalog, ApiError> {
    log::debug!("loading API catalog from {}", source);
    let text = source.read()?;
    let apis = parse_catalog(&text)?;
    Ok(Catalog::new(source, apis))
}
