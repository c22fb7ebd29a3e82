//! Binding generic document tables onto typed configuration nodes.
//!
//! Responsibilities:
//! - Walk a `Table` against a `ConfigNode` type (`bind`).
//! - Offer node implementations a reader for plain fields, nested nodes and
//!   secrets (`NodeReader`), with strict typing and declared constraints.
//! - Collect every issue of one call into a single `ValidationError`.
//!
//! Does NOT handle:
//! - Reading files (see `document`).
//! - Loading secret values (see `inject`); secrets always bind unloaded.
//!
//! Invariants:
//! - Keys a node does not read are reported as unknown fields (strict mode).
//! - A value supplied for a secret key in the primary document is ignored.
//! - Issues are raised once, at the end of the top-level call.

mod convert;
mod field;

use std::collections::BTreeSet;

use tracing::warn;

pub use convert::{FromValue, Rejection};
pub use field::{Field, Length};

use crate::document::{Table, Value};
use crate::node::ConfigNode;
use crate::secret::Secret;
use crate::validation::{FieldPath, IssueKind, PathSegment, ValidationError, ValidationIssue};

/// Binds `table` onto a new `C`, with every secret left unloaded.
///
/// # Errors
///
/// Returns a `ValidationError` carrying every unknown-field, wrong-type,
/// missing and constraint-violation issue found anywhere in the tree.
pub fn bind<C: ConfigNode>(table: &Table) -> Result<C, ValidationError> {
    let mut issues = Vec::new();
    let node = read_node::<C>(NodeReader::new(table, FieldPath::root(), &mut issues));

    match node {
        Some(node) if issues.is_empty() => Ok(node),
        _ => {
            if issues.is_empty() {
                issues.push(ValidationIssue::new(
                    FieldPath::root(),
                    IssueKind::ConstraintViolation {
                        message: format!("{} could not be built", C::NAME),
                    },
                    None,
                ));
            }
            Err(ValidationError::new(C::NAME, issues))
        }
    }
}

fn read_node<N: ConfigNode>(mut reader: NodeReader<'_>) -> Option<N> {
    let node = N::bind(&mut reader);
    reader.reject_unread();
    node
}

/// Reads the fields of one node from its table.
///
/// Every accessor records its problems on the shared issue list instead of
/// returning early, so a node's `bind` can read all fields before combining
/// the results.
pub struct NodeReader<'a> {
    table: &'a Table,
    path: FieldPath,
    issues: &'a mut Vec<ValidationIssue>,
    read: BTreeSet<String>,
}

impl<'a> NodeReader<'a> {
    fn new(table: &'a Table, path: FieldPath, issues: &'a mut Vec<ValidationIssue>) -> Self {
        Self {
            table,
            path,
            issues,
            read: BTreeSet::new(),
        }
    }

    /// Path of the node being read.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Records a custom constraint violation on `name`, for cross-field checks.
    pub fn invalid(&mut self, name: &str, message: impl Into<String>) {
        let input = self.table.get(name).cloned();
        self.issues.push(ValidationIssue::new(
            self.path.child(name),
            IssueKind::ConstraintViolation {
                message: message.into(),
            },
            input,
        ));
    }

    /// Reads a plain field.
    pub fn field<'r, T: FromValue>(&'r mut self, name: &'r str) -> Field<'r, 'a, T> {
        let Some(raw) = self.lookup(name) else {
            return Field::absent(self, name);
        };

        match T::from_value(raw) {
            Ok(value) => Field::present(self, name, value, raw),
            Err(rejections) => {
                let base = self.path.child(name);
                for rejection in rejections {
                    self.issues.push(ValidationIssue::new(
                        base.join(&rejection.at),
                        rejection.kind,
                        Some(rejection.input),
                    ));
                }
                Field::rejected(self, name)
            }
        }
    }

    /// Reads a required nested node.
    pub fn node<N: ConfigNode>(&mut self, name: &str) -> Option<N> {
        match self.lookup(name) {
            Some(raw) => self.nested(PathSegment::from(name), raw),
            None => {
                self.issues.push(ValidationIssue::new(
                    self.path.child(name),
                    IssueKind::Missing,
                    None,
                ));
                None
            }
        }
    }

    /// Reads a nested node, using `N::default()` when the key is absent.
    pub fn node_or_default<N: ConfigNode + Default>(&mut self, name: &str) -> Option<N> {
        match self.lookup(name) {
            Some(raw) => self.nested(PathSegment::from(name), raw),
            None => Some(N::default()),
        }
    }

    /// Reads an array of nested nodes; an absent key yields an empty list.
    pub fn nodes<N: ConfigNode>(&mut self, name: &str) -> Option<Vec<N>> {
        let Some(raw) = self.lookup(name) else {
            return Some(Vec::new());
        };
        let Value::Array(items) = raw else {
            self.issues.push(ValidationIssue::new(
                self.path.child(name),
                IssueKind::WrongType { expected: "array" },
                Some(raw.clone()),
            ));
            return None;
        };

        let base = self.path.child(name);
        let mut nodes = Vec::with_capacity(items.len());
        let mut failed = false;
        for (index, item) in items.iter().enumerate() {
            let path = base.child(index);
            match self.nested_at::<N>(path, item) {
                Some(node) => nodes.push(node),
                None => failed = true,
            }
        }
        (!failed).then_some(nodes)
    }

    /// Declares a secret field.
    ///
    /// Secrets never come from the primary document: the result is always
    /// unloaded, and a value present under `name` is ignored.
    pub fn secret(&mut self, name: &str) -> Secret {
        if self.lookup(name).is_some() {
            warn!(
                path = %self.path.child(name),
                "Ignoring value for secret field in configuration document"
            );
        }
        Secret::unloaded()
    }

    pub(crate) fn record(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    fn lookup(&mut self, name: &str) -> Option<&'a Value> {
        self.read.insert(name.to_string());
        let table: &'a Table = self.table;
        table.get(name)
    }

    fn nested<N: ConfigNode>(&mut self, segment: PathSegment, raw: &'a Value) -> Option<N> {
        let path = self.path.child(segment);
        self.nested_at(path, raw)
    }

    fn nested_at<N: ConfigNode>(&mut self, path: FieldPath, raw: &'a Value) -> Option<N> {
        match raw {
            Value::Table(table) => read_node::<N>(NodeReader::new(table, path, &mut *self.issues)),
            other => {
                self.issues.push(ValidationIssue::new(
                    path,
                    IssueKind::WrongType { expected: "table" },
                    Some(other.clone()),
                ));
                None
            }
        }
    }

    fn reject_unread(&mut self) {
        let table: &'a Table = self.table;
        for (key, value) in table {
            if !self.read.contains(key) {
                self.issues.push(ValidationIssue::new(
                    self.path.child(key.as_str()),
                    IssueKind::UnknownField,
                    Some(value.clone()),
                ));
            }
        }
    }
}
