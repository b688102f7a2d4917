//! Command handlers for the `apicat` binary.
//!
//! Each handler returns the text to print so the command surface can be
//! tested without a terminal. `main` only parses arguments, prints and exits.

use crate::catalog::{load_catalog, resolve_catalog_source, split_id, Catalog};
use crate::error::ApiError;
use crate::executor::{fetch_api, FetchError, FetchOptions, FetchOutput};
use crate::models::ApiDefinition;
use crate::variables::placeholders;
use crate::{build_request, ResolvedRequest};
use clap::{CommandFactory, Parser, Subcommand};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Call HTTP APIs defined in a catalog file.
#[derive(Debug, Parser)]
#[command(name = "apicat", version, disable_help_subcommand = true)]
pub struct Cli {
    /// Catalog file to use instead of the discovered one
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List API ids containing PATTERN
    List { pattern: Option<String> },

    /// Print the catalog path in use
    Where,

    /// Show the definitions matching PATTERN
    Help { pattern: Option<String> },

    /// Print the resolved request as JSON without sending it
    Request {
        /// API id, e.g. openai.chat
        api: String,
        /// Variables as KEY=VALUE
        vars: Vec<String>,
    },

    /// Run an API: `apicat <service.name> [KEY=VALUE ...]`
    #[command(external_subcommand)]
    Run(Vec<String>),
}

/// Errors reported by command handlers.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A variable argument is not `KEY=VALUE`.
    #[error("Invalid variable '{0}' (expected KEY=VALUE)")]
    InvalidAssignment(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CommandError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Text for stdout plus the exit code to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub exit_code: u8,
}

impl CommandOutput {
    fn ok(stdout: String) -> Self {
        Self {
            stdout,
            exit_code: 0,
        }
    }
}

/// The usage summary printed when no command is given.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Parses `KEY=VALUE` arguments. Values may contain `=`.
pub fn parse_assignments(args: &[String]) -> Result<HashMap<String, String>, CommandError> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => Err(CommandError::InvalidAssignment(arg.clone())),
        })
        .collect()
}

/// `list [pattern]`: one `service.name` per line.
pub fn list(catalog: &Catalog, pattern: Option<&str>) -> String {
    catalog
        .matching(pattern.unwrap_or(""))
        .map(|api| format!("{}\n", api.id()))
        .collect()
}

/// `where`: the catalog source in use.
pub fn where_catalog(config: Option<&Path>) -> String {
    format!("{}\n", resolve_catalog_source(config))
}

/// `help [pattern]`: full definitions, including the URL template and variables.
pub fn help(catalog: &Catalog, pattern: Option<&str>) -> String {
    let pattern = pattern.unwrap_or("");
    let mut out = String::new();

    for api in catalog.matching(pattern) {
        describe(&mut out, api);
    }

    if out.is_empty() {
        out = format!("No APIs match '{}'\n", pattern);
    }
    out
}

fn describe(out: &mut String, api: &ApiDefinition) {
    let _ = writeln!(out, "{}", api.id());
    let _ = writeln!(out, "  {} {}", api.method, api.url);
    for (name, value) in &api.headers {
        let _ = writeln!(out, "  {}: {}", name, value);
    }
    if let Some(body) = &api.body {
        let _ = writeln!(out, "  body: {}", body);
    }

    let mut templates = vec![api.url.as_str()];
    templates.extend(api.headers.iter().map(|(_, v)| v.as_str()));
    templates.extend(api.body.as_deref());

    let mut seen: Vec<(String, bool)> = Vec::new();
    for placeholder in templates.into_iter().flat_map(placeholders) {
        match seen.iter_mut().find(|(name, _)| name == placeholder.name) {
            Some((_, required)) => *required |= placeholder.required,
            None => seen.push((placeholder.name.to_string(), placeholder.required)),
        }
    }

    if !seen.is_empty() {
        let vars: Vec<String> = seen
            .iter()
            .map(|(name, required)| {
                if *required {
                    format!("{} (required)", name)
                } else {
                    name.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "  variables: {}", vars.join(", "));
    }
    out.push('\n');
}

/// Resolves `id` from `catalog` with the given `KEY=VALUE` arguments.
pub fn resolve_from(
    catalog: &Catalog,
    id: &str,
    args: &[String],
) -> Result<ResolvedRequest, CommandError> {
    let vars = parse_assignments(args)?;
    let definition = catalog.find(id)?;
    Ok(build_request(definition, &vars)?)
}

/// `request <id> [KEY=VALUE ...]`: the resolved request as pretty JSON.
pub fn dry_run(catalog: &Catalog, id: &str, args: &[String]) -> Result<String, CommandError> {
    let request = resolve_from(catalog, id, args)?;
    Ok(format!("{}\n", serde_json::to_string_pretty(&request)?))
}

/// `<id> [KEY=VALUE ...]`: runs the API through [`fetch_api`] and returns the raw body.
///
/// A non-2xx status still prints the body but exits with 1.
pub async fn run_api(
    config: Option<&Path>,
    id: &str,
    args: &[String],
) -> Result<CommandOutput, CommandError> {
    let (service, name) = split_id(id);
    let mut options = FetchOptions::new();
    options.vars = parse_assignments(args)?;
    if let Some(path) = config {
        options = options.with_config_path(path);
    }

    Ok(match fetch_api(service, name, &options).await? {
        FetchOutput::Full(response) => CommandOutput {
            stdout: response.body_text(),
            exit_code: if response.is_success() { 0 } else { 1 },
        },
        FetchOutput::Simple(body) => CommandOutput::ok(body.to_string()),
    })
}

/// Runs a parsed command line.
pub async fn run(cli: Cli) -> Result<CommandOutput, CommandError> {
    let config = cli.config.as_deref();

    let Some(command) = cli.command else {
        return Ok(CommandOutput::ok(usage()));
    };

    match command {
        Command::Where => Ok(CommandOutput::ok(where_catalog(config))),
        Command::List { pattern } => {
            let catalog = load_catalog(config)?;
            Ok(CommandOutput::ok(list(&catalog, pattern.as_deref())))
        }
        Command::Help { pattern } => {
            let catalog = load_catalog(config)?;
            Ok(CommandOutput::ok(help(&catalog, pattern.as_deref())))
        }
        Command::Request { api, vars } => {
            let catalog = load_catalog(config)?;
            Ok(CommandOutput::ok(dry_run(&catalog, &api, &vars)?))
        }
        Command::Run(args) => match args.split_first() {
            Some((id, rest)) => run_api(config, id, rest).await,
            None => Ok(CommandOutput::ok(usage())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSource;

    fn sample() -> Catalog {
        let text = "service\tname\turl\tmethod\theaders\tbody\n\
                    openai\tchat\thttps://api.openai.com/v1/chat/completions\tPOST\t{\"Authorization\": \"Bearer !$API_KEY\"}\t{\"model\": \"!$MODEL\", \"system\": \"$SYSTEM_PROMPT\"}\n\
                    httpbin\tget\thttps://httpbin.org/get\tGET\t{}\n";
        Catalog::parse(CatalogSource::BuiltIn, text).unwrap()
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_assignments() {
        let vars = parse_assignments(&args(&["MODEL=gpt-4", "URL=http://x?a=b"])).unwrap();
        assert_eq!(vars["MODEL"], "gpt-4");
        assert_eq!(vars["URL"], "http://x?a=b");

        let vars = parse_assignments(&args(&["EMPTY="])).unwrap();
        assert_eq!(vars["EMPTY"], "");

        assert!(matches!(
            parse_assignments(&args(&["novalue"])),
            Err(CommandError::InvalidAssignment(a)) if a == "novalue"
        ));
        assert!(parse_assignments(&args(&["=x"])).is_err());
    }

    #[test]
    fn test_list() {
        let catalog = sample();
        assert_eq!(list(&catalog, None), "openai.chat\nhttpbin.get\n");
        assert_eq!(list(&catalog, Some("http")), "httpbin.get\n");
        assert_eq!(list(&catalog, Some("nothing")), "");
    }

    #[test]
    fn test_help_shows_literal_url_and_variables() {
        let out = help(&sample(), Some("openai"));
        assert!(out.contains("openai.chat"));
        assert!(out.contains("POST https://api.openai.com/v1/chat/completions"));
        assert!(out.contains("Authorization: Bearer !$API_KEY"));
        assert!(out.contains("variables: API_KEY (required), MODEL (required), SYSTEM_PROMPT"));
        assert!(!out.contains("httpbin.get"));
    }

    #[test]
    fn test_help_no_match() {
        assert_eq!(help(&sample(), Some("zzz")), "No APIs match 'zzz'\n");
    }

    #[test]
    fn test_dry_run() {
        let out = dry_run(&sample(), "openai.chat", &args(&["API_KEY=k", "MODEL=m"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["method"], "POST");
        assert_eq!(value["headers"][0][1], "Bearer k");
    }

    #[test]
    fn test_unknown_api() {
        let err = dry_run(&sample(), "nope.nothing", &[]).unwrap_err();
        assert!(err.to_string().contains("Unknown API"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_usage_mentions_commands() {
        let text = usage();
        assert!(text.contains("Commands"));
        assert!(text.contains("list"));
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["apicat", "list", "open"]).unwrap();
        assert!(matches!(cli.command, Some(Command::List { pattern: Some(p) }) if p == "open"));

        let cli = Cli::try_parse_from(["apicat", "help", "openai"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Help { .. })));

        let cli = Cli::try_parse_from(["apicat", "--config", "x.tsv", "openai.chat", "MODEL=m"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.tsv")));
        match cli.command {
            Some(Command::Run(args)) => assert_eq!(args, vec!["openai.chat", "MODEL=m"]),
            other => panic!("Expected Run, got {:?}", other),
        }

        let cli = Cli::try_parse_from(["apicat"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[tokio::test]
    async fn test_run_without_command_prints_usage() {
        let cli = Cli::try_parse_from(["apicat"]).unwrap();
        let output = run(cli).await.unwrap();
        assert_eq!(output.exit_code, 0);
        assert!(output.stdout.contains("Commands"));
    }

    #[tokio::test]
    async fn test_where_does_not_read_catalog() {
        let cli = Cli::try_parse_from(["apicat", "where", "--config", "/missing/apis.tsv"]).unwrap();
        let output = run(cli).await.unwrap();
        assert_eq!(output.stdout, "/missing/apis.tsv\n");
        assert_eq!(output.exit_code, 0);
    }

    #[tokio::test]
    async fn test_run_api_errors_before_sending() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("apis.tsv");
        std::fs::write(
            &path,
            "service name url method headers body\nlocal test http://127.0.0.1:9/!$ID GET {}\n",
        )
        .unwrap();

        let err = run_api(Some(&path), "local.missing", &[]).await.unwrap_err();
        assert!(matches!(&err, CommandError::Fetch(e) if e.is_not_found()));

        let err = run_api(Some(&path), "local.test", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "Variable ID is required");

        let err = run_api(Some(&path), "local.test", &args(&["ID"])).await.unwrap_err();
        assert!(matches!(err, CommandError::InvalidAssignment(_)));
    }
}
