//! Deferred secret values.
//!
//! Responsibilities:
//! - Represent a secret field that is absent from the primary document and
//!   supplied later (`Secret`).
//! - Guard reads of unloaded secrets with `ConfigError::SecretsNotLoaded`.
//! - Accept the common string and `secrecy` types as secret input (`IntoSecretString`).
//!
//! Does NOT handle:
//! - Locating secret fields inside a node tree (see `inject.rs`).
//!
//! Invariants:
//! - A secret never goes back from loaded to unloaded; injection replaces it.
//! - `Debug` never prints the underlying value.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ConfigError, ConfigResult};

/// A configuration field whose value is supplied separately from the primary document.
#[derive(Clone, Default)]
pub enum Secret {
    /// Placeholder created at bind time.
    #[default]
    Unloaded,
    /// A real value supplied by a secrets document or `set_secret`.
    Loaded(SecretString),
}

impl Secret {
    /// Creates a placeholder that fails on access until replaced.
    pub fn unloaded() -> Self {
        Self::Unloaded
    }

    /// Creates a loaded secret holding `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self::Loaded(SecretString::new(value.into().into()))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Returns the wrapped `SecretString`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SecretsNotLoaded` if no value has been supplied yet.
    pub fn get(&self) -> ConfigResult<&SecretString> {
        match self {
            Self::Loaded(secret) => Ok(secret),
            Self::Unloaded => Err(ConfigError::SecretsNotLoaded),
        }
    }

    /// Returns the secret as a plain `&str`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SecretsNotLoaded` if no value has been supplied yet.
    pub fn expose_secret(&self) -> ConfigResult<&str> {
        self.get().map(ExposeSecret::expose_secret)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unloaded => f.write_str("Secret(<unloaded>)"),
            Self::Loaded(_) => f.write_str("Secret([REDACTED])"),
        }
    }
}

impl From<SecretString> for Secret {
    fn from(secret: SecretString) -> Self {
        Self::Loaded(secret)
    }
}

/// Values accepted by `set_secret`.
///
/// Already-wrapped secrets are unwrapped transparently.
pub trait IntoSecretString {
    /// Converts into a `SecretString`, or `None` for an unloaded `Secret`.
    fn into_secret_string(self) -> Option<SecretString>;
}

impl IntoSecretString for &str {
    fn into_secret_string(self) -> Option<SecretString> {
        Some(SecretString::new(self.to_string().into()))
    }
}

impl IntoSecretString for String {
    fn into_secret_string(self) -> Option<SecretString> {
        Some(SecretString::new(self.into()))
    }
}

impl IntoSecretString for SecretString {
    fn into_secret_string(self) -> Option<SecretString> {
        Some(self)
    }
}

impl IntoSecretString for &SecretString {
    fn into_secret_string(self) -> Option<SecretString> {
        Some(self.clone())
    }
}

impl IntoSecretString for Secret {
    fn into_secret_string(self) -> Option<SecretString> {
        match self {
            Self::Loaded(secret) => Some(secret),
            Self::Unloaded => None,
        }
    }
}
