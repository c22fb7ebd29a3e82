//! Tests for the configuration loader and its singleton.
//!
//! Responsibilities:
//! - Test file loading, reloading and the `Empty`/`Loaded` transitions.
//! - Test secret injection through the loader, from tables and files.
//! - Test the process-wide singleton lifecycle.
//!
//! Invariants:
//! - Singleton tests use `serial_test` since they share global state.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::PathBuf;

use tempfile::TempDir;

pub mod secrets_tests;

/// Writes `contents` to `name` inside `dir` and returns the full path.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write test file");
    path
}

pub fn missing_file(dir: &TempDir) -> PathBuf {
    dir.path().join("nope.toml")
}
