//! Loading secret values into an already bound node tree.
//!
//! Responsibilities:
//! - Walk a secrets table against a node tree and load every named secret (`inject`).
//! - Set a single secret by dotted path (`set_secret`).
//!
//! Does NOT handle:
//! - Reading secrets files (see `document::read_secrets`).
//! - Binding plain fields (see `bind`).
//!
//! Invariants:
//! - Only `Secret` fields are ever written; plain fields are reported as unknown.
//! - A valid secret is applied as soon as it is reached. Errors found
//!   elsewhere in the same call do not roll it back.
//! - Errors from the whole walk surface as one `ValidationError` at the top level.

use tracing::debug;

use crate::document::{Table, Value};
use crate::error::{ConfigError, ConfigResult};
use crate::node::{FieldMut, Node};
use crate::secret::{IntoSecretString, Secret};
use crate::validation::{FieldPath, IssueKind, ValidationError, ValidationIssue};

/// Loads every secret named by `secrets` into `root`.
///
/// `secrets` mirrors the shape of the configuration tree; leaves must be strings.
///
/// # Errors
///
/// Returns a `ValidationError` listing every key that does not name a secret
/// (or a nested node) and every non-string secret value. Secrets applied
/// before the error was detected stay loaded.
pub fn inject(root: &mut dyn Node, secrets: &Table) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    inject_into(root, secrets, &FieldPath::root(), &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(root.type_name(), issues))
    }
}

fn inject_into(
    node: &mut dyn Node,
    secrets: &Table,
    prefix: &FieldPath,
    issues: &mut Vec<ValidationIssue>,
) {
    for (key, value) in secrets {
        let path = prefix.child(key.as_str());

        match (node.field_mut(key), value) {
            (Some(FieldMut::Node(child)), Value::Table(nested)) => {
                inject_into(child, nested, &path, issues);
            }
            (Some(FieldMut::Secret(slot)), Value::String(secret)) => {
                *slot = Secret::new(secret.as_str());
                debug!(path = %path, "Loaded secret");
            }
            (Some(FieldMut::Secret(_)), other) => issues.push(ValidationIssue::new(
                path,
                IssueKind::WrongType { expected: "string" },
                Some(other.clone()),
            )),
            // Unknown keys, plain fields and nodes given a non-table value.
            _ => issues.push(ValidationIssue::new(
                path,
                IssueKind::UnknownField,
                Some(value.clone()),
            )),
        }
    }
}

/// Sets one secret addressed by a dotted path such as `"database.password"`.
///
/// # Errors
///
/// Returns `ConfigError::Path` if a segment is empty, an intermediate segment
/// is not a nested node, or the last segment is not a declared secret. Also
/// rejects an unloaded `Secret` as the value.
pub fn set_secret(
    root: &mut dyn Node,
    path: &str,
    value: impl IntoSecretString,
) -> ConfigResult<()> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(ConfigError::path_error(path, "empty path segment"));
    }
    let Some((field_name, parents)) = segments.split_last() else {
        return Err(ConfigError::path_error(path, "empty path"));
    };

    let mut node: &mut dyn Node = root;
    for segment in parents {
        let type_name = node.type_name();
        node = match node.field_mut(segment) {
            Some(FieldMut::Node(child)) => child,
            Some(other) => {
                return Err(ConfigError::path_error(
                    path,
                    format!(
                        "'{segment}' in {type_name} is {}, not a nested config node",
                        other.describe()
                    ),
                ));
            }
            None => {
                return Err(ConfigError::path_error(
                    path,
                    format!("unknown field '{segment}' in {type_name}"),
                ));
            }
        };
    }

    let type_name = node.type_name();
    match node.field_mut(field_name) {
        Some(FieldMut::Secret(slot)) => {
            let secret = value.into_secret_string().ok_or_else(|| {
                ConfigError::path_error(path, "cannot set a secret to an unloaded value")
            })?;
            *slot = Secret::from(secret);
            debug!(path, "Set secret");
            Ok(())
        }
        Some(other) => Err(ConfigError::path_error(
            path,
            format!(
                "field '{field_name}' in {type_name} is {}, not a secret",
                other.describe()
            ),
        )),
        None => Err(ConfigError::path_error(
            path,
            format!("unknown field '{field_name}' in {type_name}"),
        )),
    }
}
