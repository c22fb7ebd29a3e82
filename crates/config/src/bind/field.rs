//! Field handles with declarative constraints.

use std::collections::BTreeMap;
use std::fmt;

use super::NodeReader;
use crate::document::Value;
use crate::validation::{IssueKind, ValidationIssue};

enum FieldState<'a, T> {
    Absent,
    Rejected,
    Present { value: T, raw: &'a Value },
}

/// Types with a length, for `min_len` / `max_len`.
pub trait Length {
    fn length(&self) -> usize;
}

impl Length for String {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl<T> Length for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Length for BTreeMap<String, T> {
    fn length(&self) -> usize {
        self.len()
    }
}

/// A field being read from a node's table.
///
/// Constraint methods record a `ConstraintViolation` at the field's path the
/// first time one fails; later constraints on the same field are skipped.
/// Finish with [`required`](Field::required), [`or`](Field::or),
/// [`or_default`](Field::or_default) or [`optional`](Field::optional).
#[must_use = "a field must be finished with required(), or(), or_default() or optional()"]
pub struct Field<'r, 'a, T> {
    reader: &'r mut NodeReader<'a>,
    name: &'r str,
    state: FieldState<'a, T>,
}

impl<'r, 'a, T> Field<'r, 'a, T> {
    pub(super) fn absent(reader: &'r mut NodeReader<'a>, name: &'r str) -> Self {
        Self {
            reader,
            name,
            state: FieldState::Absent,
        }
    }

    pub(super) fn rejected(reader: &'r mut NodeReader<'a>, name: &'r str) -> Self {
        Self {
            reader,
            name,
            state: FieldState::Rejected,
        }
    }

    pub(super) fn present(
        reader: &'r mut NodeReader<'a>,
        name: &'r str,
        value: T,
        raw: &'a Value,
    ) -> Self {
        Self {
            reader,
            name,
            state: FieldState::Present { value, raw },
        }
    }

    /// Applies `predicate`; on failure records `message` as a constraint violation.
    pub fn check(mut self, predicate: impl FnOnce(&T) -> bool, message: impl Into<String>) -> Self {
        if let FieldState::Present { value, raw } = &self.state {
            if !predicate(value) {
                let raw = *raw;
                let path = self.reader.path().child(self.name);
                self.reader.record(ValidationIssue::new(
                    path,
                    IssueKind::ConstraintViolation {
                        message: message.into(),
                    },
                    Some(raw.clone()),
                ));
                self.state = FieldState::Rejected;
            }
        }
        self
    }

    /// Requires `value >= bound`.
    pub fn min(self, bound: T) -> Self
    where
        T: PartialOrd + fmt::Display,
    {
        let message = format!("must be greater than or equal to {bound}");
        self.check(|v| *v >= bound, message)
    }

    /// Requires `value <= bound`.
    pub fn max(self, bound: T) -> Self
    where
        T: PartialOrd + fmt::Display,
    {
        let message = format!("must be less than or equal to {bound}");
        self.check(|v| *v <= bound, message)
    }

    /// Requires `low <= value <= high`.
    pub fn range(self, low: T, high: T) -> Self
    where
        T: PartialOrd + fmt::Display,
    {
        self.min(low).max(high)
    }

    /// Requires at least `n` characters (strings) or elements (collections).
    pub fn min_len(self, n: usize) -> Self
    where
        T: Length,
    {
        self.check(|v| v.length() >= n, format!("length must be at least {n}"))
    }

    /// Requires at most `n` characters (strings) or elements (collections).
    pub fn max_len(self, n: usize) -> Self
    where
        T: Length,
    {
        self.check(|v| v.length() <= n, format!("length must be at most {n}"))
    }

    /// Requires the value to equal one of `allowed`.
    pub fn one_of<A>(self, allowed: &[A]) -> Self
    where
        T: PartialEq<A>,
        A: fmt::Display,
    {
        let options: Vec<String> = allowed.iter().map(ToString::to_string).collect();
        let message = format!("must be one of: {}", options.join(", "));
        self.check(|v| allowed.iter().any(|a| v == a), message)
    }

    /// Finishes a field that must be present.
    pub fn required(self) -> Option<T> {
        match self.state {
            FieldState::Present { value, .. } => Some(value),
            FieldState::Rejected => None,
            FieldState::Absent => {
                let path = self.reader.path().child(self.name);
                self.reader.record(ValidationIssue::new(
                    path,
                    IssueKind::Missing,
                    None,
                ));
                None
            }
        }
    }

    /// Finishes a field that falls back to `default` when absent.
    pub fn or(self, default: T) -> Option<T> {
        self.or_else(|| default)
    }

    pub fn or_else(self, default: impl FnOnce() -> T) -> Option<T> {
        match self.state {
            FieldState::Present { value, .. } => Some(value),
            FieldState::Rejected => None,
            FieldState::Absent => Some(default()),
        }
    }

    pub fn or_default(self) -> Option<T>
    where
        T: Default,
    {
        self.or_else(T::default)
    }

    /// Finishes a field that may be absent; `Some(None)` means absent.
    pub fn optional(self) -> Option<Option<T>> {
        match self.state {
            FieldState::Present { value, .. } => Some(Some(value)),
            FieldState::Rejected => None,
            FieldState::Absent => Some(None),
        }
    }
}
