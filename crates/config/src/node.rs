//! The configuration node contract.
//!
//! Responsibilities:
//! - Describe the closed field table of a node (`Node::field_mut`).
//! - Describe how a node is built from a document (`ConfigNode::bind`).
//!
//! Does NOT handle:
//! - Type coercion or constraint checks (see `bind`).
//!
//! Invariants:
//! - `field_mut` answers for exactly the fields the node declares; every other
//!   name returns `None`.
//! - `bind` reads every declared field through the reader, including secrets,
//!   so that undeclared keys can be detected.

use std::fmt;

use crate::bind::NodeReader;
use crate::secret::Secret;

/// Mutable view of one declared field.
pub enum FieldMut<'a> {
    /// A plain typed field. Bulk injection and dotted paths never write these.
    Value,
    /// A nested configuration node.
    Node(&'a mut dyn Node),
    /// A deferred secret.
    Secret(&'a mut Secret),
}

impl FieldMut<'_> {
    /// Short description used in path errors.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Value => "a plain value",
            Self::Node(_) => "a nested config node",
            Self::Secret(_) => "a secret",
        }
    }
}

/// Object-safe part of a configuration node, used to walk trees at runtime.
pub trait Node: fmt::Debug + Send + Sync {
    /// Type name shown in errors, e.g. `"DatabaseConfig"`.
    fn type_name(&self) -> &'static str;

    /// Looks up a declared field by name.
    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>>;
}

/// A node type that can be bound from a document.
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct DatabaseConfig {
///     host: String,
///     port: u16,
///     password: Secret,
/// }
///
/// impl Node for DatabaseConfig {
///     fn type_name(&self) -> &'static str {
///         "DatabaseConfig"
///     }
///
///     fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
///         match name {
///             "host" | "port" => Some(FieldMut::Value),
///             "password" => Some(FieldMut::Secret(&mut self.password)),
///             _ => None,
///         }
///     }
/// }
///
/// impl ConfigNode for DatabaseConfig {
///     const NAME: &'static str = "DatabaseConfig";
///
///     fn bind(reader: &mut NodeReader<'_>) -> Option<Self> {
///         let host = reader.field::<String>("host").min_len(1).required();
///         let port = reader.field::<u16>("port").min(1).or(5432);
///         let password = reader.secret("password");
///         Some(Self { host: host?, port: port?, password })
///     }
/// }
/// ```
pub trait ConfigNode: Node + Sized + 'static {
    /// Type name used as the title of validation errors.
    const NAME: &'static str;

    /// Reads every declared field from `reader`.
    ///
    /// Returns `None` when any field failed; the failure itself is recorded
    /// on the reader, so implementations read all fields before combining
    /// them with `?`.
    fn bind(reader: &mut NodeReader<'_>) -> Option<Self>;
}
