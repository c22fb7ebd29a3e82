//! Generic document trees and the TOML/JSON readers that produce them.
//!
//! Responsibilities:
//! - Define the format-independent key-value tree (`Value`, `Table`).
//! - Read primary configuration documents (TOML) and secrets documents
//!   (TOML or JSON, picked by extension).
//!
//! Does NOT handle:
//! - Mapping trees onto typed nodes (see `bind`).
//! - Injecting secrets (see `inject`).
//!
//! Invariants:
//! - Reading has no side effects beyond the file read.
//! - Secrets documents always yield a `Table` at the top level.

mod reader;
mod value;

use std::fmt;
use std::path::Path;

pub use reader::{parse_json, parse_toml, read_json, read_secrets, read_toml};
pub use value::{Table, Value};

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => f.write_str("TOML"),
            Self::Json => f.write_str("JSON"),
        }
    }
}
