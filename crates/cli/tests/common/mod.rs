//! Shared test utilities for keystone-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//! - Write fixture documents into temporary directories.
//!
//! Invariants / Assumptions:
//! - `KEYSTONE_CONFIG`, `KEYSTONE_SECRETS` and `RUST_LOG` are cleared so the
//!   host environment cannot change test outcomes.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Returns a hermetic `keystone-cli` command for integration testing.
pub fn keystone_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("keystone-cli");

    cmd.env_remove("KEYSTONE_CONFIG")
        .env_remove("KEYSTONE_SECRETS")
        .env_remove("RUST_LOG");

    cmd
}

/// Writes `contents` to `name` inside `dir` and returns the full path.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

pub const SERVICE_TOML: &str = r#"
name = "billing"

[database]
host = "db.internal"
port = 5433
"#;

pub const SECRETS_JSON: &str = r#"{
    "api_token": "tok-123",
    "database": {"password": "hunter2"}
}"#;
