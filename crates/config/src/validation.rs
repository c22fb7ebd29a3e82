//! Aggregated validation errors with structural paths.
//!
//! Responsibilities:
//! - Track the location of a problem inside a document (`FieldPath`).
//! - Describe individual problems (`ValidationIssue`, `IssueKind`).
//! - Collect every issue of one bind/inject call into a `ValidationError`.
//!
//! Does NOT handle:
//! - Deciding what counts as an issue (see `bind` and `inject`).
//!
//! Invariants:
//! - A `ValidationError` always carries at least one issue.
//! - `Display` output lists paths and kinds only; offending inputs are kept on
//!   the issue for programmatic inspection but never formatted, since secrets
//!   documents put secret material there.

use std::fmt;

use thiserror::Error;

use crate::document::Value;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Location of a field inside a configuration tree, e.g. `servers[2].host`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The empty path addressing the root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Returns a new path with every segment of `suffix` appended.
    pub fn join(&self, suffix: &FieldPath) -> Self {
        let mut segments = self.0.clone();
        segments.extend(suffix.0.iter().cloned());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Category of a validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The key is not a declared field, or the field cannot accept this kind of input.
    UnknownField,
    /// The value has the wrong type for the field.
    WrongType { expected: &'static str },
    /// The value is well-typed but breaks a declared constraint.
    ConstraintViolation { message: String },
    /// A required field is absent.
    Missing,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField => f.write_str("unknown field"),
            Self::WrongType { expected } => write!(f, "expected {expected}"),
            Self::ConstraintViolation { message } => f.write_str(message),
            Self::Missing => f.write_str("field required"),
        }
    }
}

/// A single problem found while binding or injecting.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub path: FieldPath,
    pub kind: IssueKind,
    /// The offending raw value, absent for `IssueKind::Missing`.
    pub input: Option<Value>,
}

impl ValidationIssue {
    pub fn new(path: FieldPath, kind: IssueKind, input: Option<Value>) -> Self {
        Self { path, kind, input }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.input {
            Some(input) => write!(f, "{}: {} (got {})", self.path, self.kind, input.kind()),
            None => write!(f, "{}: {}", self.path, self.kind),
        }
    }
}

/// Every issue collected by one bind or inject call.
#[derive(Debug, Clone, Error)]
pub struct ValidationError {
    title: String,
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub(crate) fn new(title: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self {
            title: title.into(),
            issues,
        }
    }

    /// Name of the node type the failing call started from.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Returns the issue reported at `path` (written as `a.b[0].c`), if any.
    pub fn issue_at(&self, path: &str) -> Option<&ValidationIssue> {
        self.issues.iter().find(|issue| issue.path.to_string() == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.issues.len();
        write!(
            f,
            "{count} validation error{} for {}",
            if count == 1 { "" } else { "s" },
            self.title
        )?;
        for issue in &self.issues {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}
