//! HTTP request executor.
//!
//! [`fetch_api`] looks an API up, resolves it with [`get_request`] and sends
//! the result with reqwest. Nothing here retries or caches; a failed call is
//! reported once to the caller.

pub mod config;
pub mod error;
pub mod native;

pub use config::ExecutionConfig;
pub use error::{FetchError, RequestError};
pub use native::execute_request;

use crate::get_request;
use crate::models::ApiResponse;
use std::collections::HashMap;
use std::path::PathBuf;

/// Options for a single [`fetch_api`] call.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Catalog to read instead of the discovered one.
    pub config_path: Option<PathBuf>,

    /// Return the parsed response body instead of the full response.
    pub simple: bool,

    /// Caller-supplied variable values.
    pub vars: HashMap<String, String>,

    /// Execution settings; read from the environment when `None`.
    pub execution: Option<ExecutionConfig>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn simple(mut self, simple: bool) -> Self {
        self.simple = simple;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionConfig) -> Self {
        self.execution = Some(execution);
        self
    }
}

/// Result of [`fetch_api`].
#[derive(Debug, Clone)]
pub enum FetchOutput {
    /// The response body parsed as JSON, or a JSON string of the raw text.
    Simple(serde_json::Value),
    /// The full response.
    Full(ApiResponse),
}

/// Resolves `service.name` and sends it.
///
/// # Errors
///
/// [`FetchError::Api`] for lookup and resolution failures,
/// [`FetchError::Request`] for transport failures and
/// [`FetchError::Config`] for invalid environment settings. HTTP error
/// statuses are not errors.
///
/// # Examples
///
/// ```no_run
/// use apicat::executor::{fetch_api, FetchOptions, FetchOutput};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let options = FetchOptions::new()
///     .with_var("MODEL", "gpt-4")
///     .with_var("PROMPT", "hi")
///     .simple(true);
///
/// if let FetchOutput::Simple(body) = fetch_api("openai", "chat", &options).await? {
///     println!("{}", body);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_api(
    service: &str,
    name: &str,
    options: &FetchOptions,
) -> Result<FetchOutput, FetchError> {
    let request = get_request(
        service,
        name,
        &options.vars,
        options.config_path.as_deref(),
    )?;

    let execution = match &options.execution {
        Some(execution) => execution.clone(),
        None => ExecutionConfig::from_env()?,
    };

    let response = execute_request(&request, &execution).await?;
    if !response.is_success() {
        log::warn!(
            "{}.{} returned {} {}",
            service,
            name,
            response.status_code,
            response.status_text
        );
    }

    Ok(if options.simple {
        FetchOutput::Simple(response.json_or_text())
    } else {
        FetchOutput::Full(response)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_options_builder() {
        let options = FetchOptions::new()
            .with_var("MODEL", "gpt-4")
            .with_config_path("/tmp/apis.tsv")
            .simple(true)
            .with_execution(ExecutionConfig::new(5));

        assert_eq!(options.vars.get("MODEL").map(String::as_str), Some("gpt-4"));
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/apis.tsv")));
        assert!(options.simple);
        assert_eq!(options.execution.unwrap().timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_unknown_api_is_not_found() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("apis.tsv");
        std::fs::write(
            &path,
            "service name url method headers body\nlocal test http://localhost GET {}\n",
        )
        .unwrap();

        let options = FetchOptions::new().with_config_path(&path);
        let err = fetch_api("local", "missing", &options).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Unknown API"));
    }
}
