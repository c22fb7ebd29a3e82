//! Flattening document trees into dotted-path leaves.
//!
//! Responsibilities:
//! - Walk a `Table` depth-first and yield one `Leaf` per scalar or empty container.
//! - Redact values that come from a secrets document.
//!
//! Invariants:
//! - Paths use the same rendering as validation errors (`servers[2].host`).
//! - A redacted leaf keeps its kind but never its value.

use std::fmt;

use keystone_config::{FieldPath, Table, Value};
use serde::Serialize;

const REDACTED: &str = "[REDACTED]";

/// Which document a leaf was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Config,
    Secrets,
}

/// The value shown for a leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Shown<'a> {
    Plain(&'a Value),
    Redacted(&'static str),
}

impl fmt::Display for Shown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(value) => write!(f, "{value}"),
            Self::Redacted(text) => f.write_str(text),
        }
    }
}

/// One addressable value of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaf<'a> {
    pub path: String,
    pub kind: &'static str,
    pub source: Source,
    pub value: Shown<'a>,
}

impl fmt::Display for Leaf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) = {}", self.path, self.kind, self.value)
    }
}

/// Flattens `table` into leaves; values are redacted when `source` is `Secrets`.
pub fn collect(table: &Table, source: Source) -> Vec<Leaf<'_>> {
    let mut leaves = Vec::new();
    walk_table(table, &FieldPath::root(), source, &mut leaves);
    leaves
}

fn walk_table<'a>(table: &'a Table, path: &FieldPath, source: Source, out: &mut Vec<Leaf<'a>>) {
    for (key, value) in table {
        walk(value, path.child(key.as_str()), source, out);
    }
}

fn walk<'a>(value: &'a Value, path: FieldPath, source: Source, out: &mut Vec<Leaf<'a>>) {
    match value {
        Value::Table(table) if !table.is_empty() => walk_table(table, &path, source, out),
        Value::Array(items) if !items.is_empty() => {
            for (index, item) in items.iter().enumerate() {
                walk(item, path.child(index), source, out);
            }
        }
        _ => {
            let shown = match source {
                Source::Config => Shown::Plain(value),
                Source::Secrets => Shown::Redacted(REDACTED),
            };
            out.push(Leaf {
                path: path.to_string(),
                kind: value.kind(),
                source,
                value: shown,
            });
        }
    }
}
