//! Typed configuration loading with deferred secrets.
//!
//! This crate binds TOML configuration documents onto strongly typed node
//! trees and fills in secret fields later, from a secrets document or by
//! dotted path. Reading a secret before it has been supplied fails with
//! [`ConfigError::SecretsNotLoaded`].

pub mod bind;
pub mod document;
mod error;
pub mod inject;
mod loader;
pub mod node;
mod secret;
pub mod validation;

pub use bind::{NodeReader, bind};
pub use document::{Format, Table, Value};
pub use error::{ConfigError, ConfigResult};
pub use inject::{inject, set_secret};
pub use loader::{ConfigGuard, ConfigLoader, GlobalLoader};
pub use node::{ConfigNode, FieldMut, Node};
pub use secret::{IntoSecretString, Secret};
pub use validation::{FieldPath, IssueKind, PathSegment, ValidationError, ValidationIssue};
