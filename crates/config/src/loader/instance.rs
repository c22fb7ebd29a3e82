//! The `ConfigLoader` state machine (`Empty` / `Loaded`).

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::bind::bind;
use crate::document::{Table, read_secrets, read_toml};
use crate::error::{ConfigError, ConfigResult};
use crate::inject::{inject, set_secret};
use crate::node::ConfigNode;
use crate::secret::IntoSecretString;

/// Holds the configuration tree for one node type `C`.
#[derive(Debug)]
pub struct ConfigLoader<C: ConfigNode> {
    path: Option<PathBuf>,
    config: Option<C>,
}

impl<C: ConfigNode> Default for ConfigLoader<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ConfigNode> ConfigLoader<C> {
    /// Create an empty loader with no source path.
    pub fn new() -> Self {
        Self {
            path: None,
            config: None,
        }
    }

    /// Create an empty loader that remembers `path` for [`reload`](Self::reload).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: None,
        }
    }

    /// Create a loader and load `path` immediately.
    pub fn from_path(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let mut loader = Self::with_path(path);
        loader.reload()?;
        Ok(loader)
    }

    /// Path of the last successfully loaded file, or the one given to `with_path`.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.config.is_some()
    }

    /// Get the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotLoaded` if nothing has been loaded yet.
    pub fn config(&self) -> ConfigResult<&C> {
        self.config.as_ref().ok_or(ConfigError::ConfigNotLoaded)
    }

    pub fn config_mut(&mut self) -> ConfigResult<&mut C> {
        self.config.as_mut().ok_or(ConfigError::ConfigNotLoaded)
    }

    /// Install an already validated configuration, replacing any current one.
    pub fn load(&mut self, config: C) {
        info!(config = C::NAME, "Configuration installed");
        self.config = Some(config);
    }

    /// Remove and return the current configuration, leaving the loader empty.
    pub fn take(&mut self) -> Option<C> {
        self.config.take()
    }

    /// Read and bind a TOML file, then install the result.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound`, `Parse` or `Validation`; the loader is unchanged
    /// on error.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<&C> {
        let path = path.as_ref();
        let table = read_toml(path)?;
        let config = bind::<C>(&table)?;
        debug!(path = %path.display(), config = C::NAME, "Configuration file bound");

        self.path = Some(path.to_path_buf());
        self.load(config);
        self.config()
    }

    /// Re-read the remembered source path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoSourcePath` if no path is known, otherwise as
    /// [`load_file`](Self::load_file).
    pub fn reload(&mut self) -> ConfigResult<&C> {
        let path = self.path.clone().ok_or(ConfigError::NoSourcePath)?;
        self.load_file(path)
    }

    /// Inject secret values into the loaded configuration.
    ///
    /// `secrets` mirrors the configuration structure; leaves are secret strings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotLoaded` if nothing is loaded, or `Validation` when a
    /// key does not correspond to a secret field or a value is not a string.
    pub fn load_secrets(&mut self, secrets: &Table) -> ConfigResult<()> {
        let config = self.config_mut()?;
        inject(config, secrets)?;
        Ok(())
    }

    /// Read a `.toml` or `.json` secrets file and inject it.
    pub fn load_secrets_from_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<()> {
        self.config()?;
        let path = path.as_ref();
        let secrets = read_secrets(path)?;
        debug!(path = %path.display(), "Secrets file read");
        self.load_secrets(&secrets)
    }

    /// Set a single secret by dotted path, e.g. `"database.password"`.
    pub fn set_secret(&mut self, path: &str, value: impl IntoSecretString) -> ConfigResult<()> {
        let config = self.config_mut()?;
        set_secret(config, path, value)
    }
}
