//! TOML and JSON document readers.

use std::path::Path;

use tracing::debug;

use super::{Format, Table, Value};
use crate::error::{ConfigError, ConfigResult};

const INLINE_ORIGIN: &str = "<inline>";

fn read_text(path: &Path, format: Format) -> ConfigResult<String> {
    debug!(path = %path.display(), "Reading configuration document");
    let bytes = std::fs::read(path).map_err(|source| ConfigError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|e| ConfigError::Parse {
        origin: path.display().to_string(),
        format,
        message: e.utf8_error().to_string(),
    })
}

fn toml_from_str(text: &str, origin: &str) -> ConfigResult<Table> {
    let table: toml::Table = toml::from_str(text).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        format: Format::Toml,
        message: e.message().to_string(),
    })?;

    Ok(table
        .into_iter()
        .map(|(key, value)| (key, Value::from(value)))
        .collect())
}

fn json_from_str(text: &str, origin: &str) -> ConfigResult<Value> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        format: Format::Json,
        message: e.to_string(),
    })?;
    Ok(Value::from(value))
}

/// Parses TOML text into a table.
pub fn parse_toml(text: &str) -> ConfigResult<Table> {
    toml_from_str(text, INLINE_ORIGIN)
}

/// Parses JSON text into a value of any kind.
pub fn parse_json(text: &str) -> ConfigResult<Value> {
    json_from_str(text, INLINE_ORIGIN)
}

/// Reads and parses a TOML file.
///
/// # Errors
///
/// - `ConfigError::FileNotFound` if the file cannot be read.
/// - `ConfigError::Parse` if the content is not UTF-8 or not valid TOML.
pub fn read_toml(path: &Path) -> ConfigResult<Table> {
    let text = read_text(path, Format::Toml)?;
    toml_from_str(&text, &path.display().to_string())
}

/// Reads and parses a JSON file. The top level may be any JSON value.
pub fn read_json(path: &Path) -> ConfigResult<Value> {
    let text = read_text(path, Format::Json)?;
    json_from_str(&text, &path.display().to_string())
}

/// Reads a secrets document, choosing the reader from the file extension.
///
/// # Errors
///
/// - `ConfigError::UnsupportedFormat` for extensions other than `.toml` and `.json`.
/// - `ConfigError::Schema` if a JSON document's top level is not an object.
/// - Any error from [`read_toml`] or [`read_json`].
pub fn read_secrets(path: &Path) -> ConfigResult<Table> {
    match Format::from_path(path) {
        Some(Format::Toml) => read_toml(path),
        Some(Format::Json) => match read_json(path)? {
            Value::Table(table) => Ok(table),
            other => Err(ConfigError::Schema {
                path: path.to_path_buf(),
                found: other.kind(),
            }),
        },
        None => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
                .unwrap_or_default(),
        }),
    }
}
