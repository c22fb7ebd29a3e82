//! Error types for configuration loading and secret injection.
//!
//! Responsibilities:
//! - Define the single `ConfigError` enum surfaced by every public operation.
//! - Convert aggregated validation failures into `ConfigError::Validation`.
//!
//! Does NOT handle:
//! - Building the individual validation issues (see `validation.rs`).
//!
//! Invariants:
//! - Error messages never include secret values; only paths, formats and kinds.
//! - `Validation` is raised once per top-level bind/inject call, never per issue.

use std::path::PathBuf;
use thiserror::Error;

use crate::document::Format;
use crate::validation::ValidationError;

/// Result alias used throughout the crate.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading configuration or secrets.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {format} in {origin}: {message}")]
    Parse {
        origin: String,
        format: Format,
        message: String,
    },

    #[error("Expected a top-level object in {}, got {found}", path.display())]
    Schema { path: PathBuf, found: &'static str },

    #[error("Unsupported secrets file extension '{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No configuration loaded")]
    ConfigNotLoaded,

    #[error("Secret has not been loaded yet")]
    SecretsNotLoaded,

    #[error("Invalid secret path '{path}': {message}")]
    Path { path: String, message: String },

    #[error("No configuration path provided")]
    NoSourcePath,
}

impl ConfigError {
    /// Returns the aggregated validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn path_error(path: &str, message: impl Into<String>) -> Self {
        Self::Path {
            path: path.to_string(),
            message: message.into(),
        }
    }
}
