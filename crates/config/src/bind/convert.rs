//! Strict conversions from document values to Rust field types.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::document::Value;
use crate::validation::{FieldPath, IssueKind};

/// Why a value could not be converted.
///
/// `at` is relative to the field being read, so nested containers can point
/// at the exact element that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub at: FieldPath,
    pub kind: IssueKind,
    pub input: Value,
}

impl Rejection {
    pub fn wrong_type(expected: &'static str, input: &Value) -> Self {
        Self {
            at: FieldPath::root(),
            kind: IssueKind::WrongType { expected },
            input: input.clone(),
        }
    }

    pub fn constraint(message: impl Into<String>, input: &Value) -> Self {
        Self {
            at: FieldPath::root(),
            kind: IssueKind::ConstraintViolation {
                message: message.into(),
            },
            input: input.clone(),
        }
    }

    fn nested_under(mut self, prefix: FieldPath) -> Self {
        self.at = prefix.join(&self.at);
        self
    }
}

/// Types that a plain field can hold.
///
/// Conversions are strict: no string-to-number or number-to-string coercion.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, Vec<Rejection>>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, Vec<Rejection>> {
        Ok(value.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, Vec<Rejection>> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(vec![Rejection::wrong_type("string", other)]),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, Vec<Rejection>> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(vec![Rejection::wrong_type("boolean", other)]),
        }
    }
}

impl FromValue for PathBuf {
    fn from_value(value: &Value) -> Result<Self, Vec<Rejection>> {
        String::from_value(value).map(PathBuf::from)
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, Vec<Rejection>> {
                    match value {
                        Value::Integer(i) => <$ty>::try_from(*i).map_err(|_| {
                            vec![Rejection::constraint(
                                format!("integer out of range for {}", stringify!($ty)),
                                value,
                            )]
                        }),
                        other => Err(vec![Rejection::wrong_type("integer", other)]),
                    }
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, Vec<Rejection>> {
        match value {
            Value::Float(x) => Ok(*x),
            Value::Integer(i) => Ok(*i as f64),
            other => Err(vec![Rejection::wrong_type("float", other)]),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self, Vec<Rejection>> {
        f64::from_value(value).map(|x| x as f32)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, Vec<Rejection>> {
        if value.is_null() {
            return Ok(None);
        }
        T::from_value(value).map(Some)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, Vec<Rejection>> {
        let Value::Array(items) = value else {
            return Err(vec![Rejection::wrong_type("array", value)]);
        };

        let mut out = Vec::with_capacity(items.len());
        let mut rejections = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match T::from_value(item) {
                Ok(converted) => out.push(converted),
                Err(errs) => rejections.extend(
                    errs.into_iter()
                        .map(|r| r.nested_under(FieldPath::root().child(index))),
                ),
            }
        }

        if rejections.is_empty() {
            Ok(out)
        } else {
            Err(rejections)
        }
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    fn from_value(value: &Value) -> Result<Self, Vec<Rejection>> {
        let Value::Table(table) = value else {
            return Err(vec![Rejection::wrong_type("table", value)]);
        };

        let mut out = BTreeMap::new();
        let mut rejections = Vec::new();
        for (key, item) in table {
            match T::from_value(item) {
                Ok(converted) => {
                    out.insert(key.clone(), converted);
                }
                Err(errs) => rejections.extend(
                    errs.into_iter()
                        .map(|r| r.nested_under(FieldPath::root().child(key.as_str()))),
                ),
            }
        }

        if rejections.is_empty() {
            Ok(out)
        } else {
            Err(rejections)
        }
    }
}
