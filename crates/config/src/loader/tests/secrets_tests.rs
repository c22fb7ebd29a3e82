//! Secret loading tests for the configuration loader.
//!
//! Responsibilities:
//! - Test `load_secrets` with valid, partially invalid and unloaded states.
//! - Test `load_secrets_from_file` for TOML, JSON and unsupported formats.
//! - Test `set_secret` through the loader.

use secrecy::SecretString;
use tempfile::TempDir;

use crate::document::{Table, Value, parse_json};
use crate::error::ConfigError;
use crate::loader::ConfigLoader;
use crate::secret::Secret;
use crate::test_util::{DummyConfig, GOOD_TOML, dummy_config};
use crate::validation::IssueKind;

use super::write_file;

fn secrets(json: &str) -> Table {
    match parse_json(json).unwrap() {
        Value::Table(table) => table,
        other => panic!("expected table, got {}", other.kind()),
    }
}

fn loaded() -> ConfigLoader<DummyConfig> {
    let mut loader = ConfigLoader::new();
    loader.load(dummy_config());
    loader
}

#[test]
fn test_load_secrets_requires_config() {
    let mut loader = ConfigLoader::<DummyConfig>::new();
    let result = loader.load_secrets(&secrets(r#"{"top_level_secret": "x"}"#));
    assert!(matches!(result, Err(ConfigError::ConfigNotLoaded)));
}

#[test]
fn test_load_secrets_then_set_secret() {
    let mut loader = loaded();

    let err = loader
        .load_secrets(&secrets(
            r#"{"first": {"first_secret": 43}, "second": {"wrong_key": "secret1"}}"#,
        ))
        .unwrap_err();
    let validation = err.as_validation().unwrap();
    assert_eq!(validation.issues().len(), 2);

    loader
        .load_secrets(&secrets(
            r#"{
                "top_level_secret": "secret0",
                "first": {"first_secret": "secret1"},
                "second": {"second_secret": "secret2"}
            }"#,
        ))
        .unwrap();

    let config = loader.config().unwrap();
    assert_eq!(config.top_level_secret.expose_secret().unwrap(), "secret0");
    assert_eq!(config.first.first_secret.expose_secret().unwrap(), "secret1");
    assert_eq!(config.second.second_secret.expose_secret().unwrap(), "secret2");

    loader.set_secret("second.second_secret", "secret3").unwrap();
    assert_eq!(
        loader.config().unwrap().second.second_secret.expose_secret().unwrap(),
        "secret3"
    );

    let wrapped = SecretString::new("secret4".to_string().into());
    loader.set_secret("second.second_secret", wrapped).unwrap();
    assert_eq!(
        loader.config().unwrap().second.second_secret.expose_secret().unwrap(),
        "secret4"
    );
}

#[test]
fn test_failed_load_secrets_keeps_partial_effects() {
    let mut loader = loaded();

    let err = loader
        .load_secrets(&secrets(
            r#"{"top_level_secret": "kept", "unknown": "x"}"#,
        ))
        .unwrap_err();

    let validation = err.as_validation().unwrap();
    assert_eq!(
        validation.issue_at("unknown").unwrap().kind,
        IssueKind::UnknownField
    );
    assert_eq!(
        loader.config().unwrap().top_level_secret.expose_secret().unwrap(),
        "kept"
    );
}

#[test]
fn test_load_secrets_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let config_path = write_file(&dir, "app.toml", GOOD_TOML);
    let secrets_path = write_file(
        &dir,
        "secrets.toml",
        "top_level_secret = \"t\"\n[first]\nfirst_secret = \"f\"\n",
    );

    let mut loader = ConfigLoader::<DummyConfig>::new();
    loader.load_file(&config_path).unwrap();
    loader.load_secrets_from_file(&secrets_path).unwrap();

    let config = loader.config().unwrap();
    assert_eq!(config.top_level_secret.expose_secret().unwrap(), "t");
    assert_eq!(config.first.first_secret.expose_secret().unwrap(), "f");
    assert!(!config.second.second_secret.is_loaded());
}

#[test]
fn test_load_secrets_from_json_file() {
    let dir = TempDir::new().unwrap();
    let secrets_path = write_file(
        &dir,
        "secrets.json",
        r#"{"second": {"second_secret": "from-json"}}"#,
    );

    let mut loader = loaded();
    loader.load_secrets_from_file(&secrets_path).unwrap();
    assert_eq!(
        loader.config().unwrap().second.second_secret.expose_secret().unwrap(),
        "from-json"
    );
}

#[test]
fn test_load_secrets_from_json_array_is_schema_error() {
    let dir = TempDir::new().unwrap();
    let secrets_path = write_file(&dir, "secrets.json", r#"["not", "an", "object"]"#);

    let mut loader = loaded();
    let result = loader.load_secrets_from_file(&secrets_path);
    assert!(matches!(result, Err(ConfigError::Schema { found: "array", .. })));
}

#[test]
fn test_load_secrets_from_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let secrets_path = write_file(&dir, "secrets.ini", "x=1");

    let mut loader = loaded();
    let result = loader.load_secrets_from_file(&secrets_path);
    assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
}

#[test]
fn test_set_secret_requires_config() {
    let mut loader = ConfigLoader::<DummyConfig>::new();
    let result = loader.set_secret("top_level_secret", "x");
    assert!(matches!(result, Err(ConfigError::ConfigNotLoaded)));
}

#[test]
fn test_set_secret_unknown_path() {
    let mut loader = loaded();
    let result = loader.set_secret("second.unknown", "s");
    assert!(matches!(result, Err(ConfigError::Path { .. })));
}

#[test]
fn test_config_mut_allows_direct_assignment() {
    let mut loader = loaded();
    loader.config_mut().unwrap().second.second_secret = Secret::new("hello");
    assert_eq!(
        loader.config().unwrap().second.second_secret.expose_secret().unwrap(),
        "hello"
    );
}
