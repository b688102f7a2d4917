//! Request resolution scenarios against the shipped catalog.

use apicat::variables::{default_aliases, resolve, Resolver};
use apicat::{get_request, ApiError, HttpMethod};
use proptest::prelude::*;
use serial_test::serial;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Variables the shipped catalog reads from the environment.
const CATALOG_ENV_VARS: [&str; 5] = [
    "API_KEY",
    "OPENAI_API_KEY",
    "OPENROUTER_API_KEY",
    "PROMPT",
    "SYSTEM_PROMPT",
];

fn shipped_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("apis.tsv")
}

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Runs `f` with the catalog's environment variables cleared, restoring them afterwards.
fn without_catalog_env<F: FnOnce()>(f: F) {
    let saved: Vec<(&str, Option<String>)> = CATALOG_ENV_VARS
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();
    for name in CATALOG_ENV_VARS {
        std::env::remove_var(name);
    }

    f();

    for (name, value) in saved {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }
}

#[test]
fn test_local_placeholder_in_url() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("apis.tsv");
    fs::write(
        &path,
        "service name url method headers body\nlocal test http://localhost/$VAR GET {}\n",
    )
    .unwrap();

    let request = get_request("local", "test", &vars(&[("VAR", "foo")]), Some(&path)).unwrap();
    assert_eq!(request.url, "http://localhost/foo");
    assert_eq!(request.method, HttpMethod::GET);
    assert!(request.body.is_none());
}

#[test]
fn test_openai_chat() {
    let request = get_request(
        "openai",
        "chat",
        &vars(&[("API_KEY", "test-key"), ("MODEL", "gpt-4"), ("PROMPT", "hi")]),
        Some(&shipped_catalog()),
    )
    .unwrap();

    assert_eq!(request.header("Authorization"), Some("Bearer test-key"));
    let body = request.json_body().expect("body should be JSON");
    assert_eq!(body["model"], "gpt-4");
    assert_eq!(body["messages"][0]["content"], "hi");
}

#[test]
#[serial]
fn test_openai_chat_missing_variables() {
    without_catalog_env(|| {
        let err = get_request(
            "openai",
            "chat",
            &vars(&[("MODEL", "gpt-4")]),
            Some(&shipped_catalog()),
        )
        .unwrap_err();

        assert!(matches!(err, ApiError::MissingRequiredVariable(_)));
        // Headers resolve before the body, so the key is reported first.
        assert_eq!(err.to_string(), "Variable API_KEY is required");

        let err = get_request(
            "openai",
            "chat",
            &vars(&[("API_KEY", "k"), ("MODEL", "gpt-4")]),
            Some(&shipped_catalog()),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Variable PROMPT is required");
    });
}

#[test]
#[serial]
fn test_openrouter_optional_system_prompt() {
    without_catalog_env(|| {
        let request = get_request(
            "openrouter",
            "chat",
            &vars(&[("API_KEY", "key"), ("MODEL", "m"), ("PROMPT", "hello")]),
            Some(&shipped_catalog()),
        )
        .unwrap();

        let body = request.json_body().unwrap();
        assert_eq!(body["messages"][0]["content"], "");
        assert_eq!(body["messages"][1]["content"], "hello");
    });
}

#[test]
fn test_discovered_catalog() {
    // Tests run from the crate root, where apis.tsv is found by directory search.
    if std::env::var_os("APICAT_CONFIG").is_some() {
        return;
    }
    let request = get_request("httpbin", "get", &vars(&[("QUERY", "rust")]), None).unwrap();
    assert_eq!(request.url, "https://httpbin.org/get?q=rust");
}

#[test]
#[serial]
fn test_alias_supplied_openai_key() {
    without_catalog_env(|| {
        let request = get_request(
            "openai",
            "chat",
            &vars(&[("OPENAI_API_KEY", "sk-1"), ("MODEL", "m"), ("PROMPT", "p")]),
            Some(&shipped_catalog()),
        )
        .unwrap();
        assert_eq!(request.header("Authorization"), Some("Bearer sk-1"));
    });
}

#[test]
#[serial]
fn test_alias_from_environment() {
    without_catalog_env(|| {
        std::env::set_var("OPENROUTER_API_KEY", "sk-or-env");
        let request = get_request(
            "openrouter",
            "chat",
            &vars(&[("MODEL", "m"), ("PROMPT", "p")]),
            Some(&shipped_catalog()),
        )
        .unwrap();
        assert_eq!(request.header("Authorization"), Some("Bearer sk-or-env"));
    });
}

#[test]
#[serial]
fn test_supplied_value_beats_environment() {
    without_catalog_env(|| {
        std::env::set_var("API_KEY", "from-env");
        let request = get_request(
            "openai",
            "models",
            &vars(&[("API_KEY", "explicit")]),
            Some(&shipped_catalog()),
        )
        .unwrap();
        assert_eq!(request.header("Authorization"), Some("Bearer explicit"));
    });
}

#[test]
#[serial]
fn test_missing_key_everywhere() {
    without_catalog_env(|| {
        let err = get_request("openai", "models", &vars(&[]), Some(&shipped_catalog()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Variable API_KEY is required");
    });
}

#[test]
fn test_unknown_api_request() {
    let err = get_request("openai", "nope", &vars(&[]), Some(&shipped_catalog())).unwrap_err();
    assert!(err.is_not_found());
}

proptest! {
    #[test]
    fn prop_resolution_is_idempotent(
        template in "[a-z /:!$_A-Z{}\"]{0,40}",
        value in "[a-zA-Z0-9 $!]{0,12}",
    ) {
        let supplied = vars(&[("A", value.as_str()), ("B_1", value.as_str())]);
        let env: BTreeMap<String, String> = BTreeMap::new();
        let resolver = Resolver::new(default_aliases()).with_source(&supplied).with_source(&env);

        let first = resolver.resolve(&template);
        let second = resolver.resolve(&template);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "resolution outcome changed between runs"),
        }
    }

    #[test]
    fn prop_text_without_markers_is_unchanged(text in "[^$]{0,60}") {
        prop_assert_eq!(resolve(&text, &HashMap::new()).unwrap(), text);
    }
}
