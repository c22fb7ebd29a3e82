//! One process-wide `ConfigLoader` per configuration type.

use std::ops::Deref;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::ConfigLoader;
use crate::error::{ConfigError, ConfigResult};
use crate::node::ConfigNode;

/// A loader type bound to one configuration node type.
///
/// Implement it with [`global_loader!`](crate::global_loader), which supplies
/// the static slot:
///
/// ```rust,ignore
/// keystone_config::global_loader! {
///     pub struct AppLoader => AppConfig;
/// }
///
/// AppLoader::write().load_file("app.toml")?;
/// let config = AppLoader::get()?;
/// ```
pub trait GlobalLoader: 'static {
    type Config: ConfigNode;

    /// The static slot backing [`singleton`](Self::singleton).
    fn slot() -> &'static OnceLock<RwLock<ConfigLoader<Self::Config>>>;

    /// The shared loader, created empty on first access.
    fn singleton() -> &'static RwLock<ConfigLoader<Self::Config>> {
        Self::slot().get_or_init(|| {
            debug!(config = <Self::Config as ConfigNode>::NAME, "Creating global config loader");
            RwLock::new(ConfigLoader::new())
        })
    }

    /// Shared read access to the singleton loader.
    fn read() -> RwLockReadGuard<'static, ConfigLoader<Self::Config>> {
        Self::singleton()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access to the singleton loader, for loading and secrets.
    fn write() -> RwLockWriteGuard<'static, ConfigLoader<Self::Config>> {
        Self::singleton()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The singleton's configuration.
    ///
    /// The returned guard holds the read lock; drop it before calling
    /// [`write`](Self::write) on the same thread.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotLoaded` if the singleton is empty.
    fn get() -> ConfigResult<ConfigGuard<Self::Config>> {
        ConfigGuard::new(Self::read())
    }

    /// Return the singleton to its empty state. Intended for test teardown.
    fn reset() {
        *Self::write() = ConfigLoader::new();
    }
}

/// Read access to a loaded singleton configuration.
pub struct ConfigGuard<C: ConfigNode> {
    guard: RwLockReadGuard<'static, ConfigLoader<C>>,
}

impl<C: ConfigNode> ConfigGuard<C> {
    fn new(guard: RwLockReadGuard<'static, ConfigLoader<C>>) -> ConfigResult<Self> {
        if guard.is_loaded() {
            Ok(Self { guard })
        } else {
            Err(ConfigError::ConfigNotLoaded)
        }
    }
}

impl<C: ConfigNode> Deref for ConfigGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        match self.guard.config() {
            Ok(config) => config,
            // Checked in `new`; the read lock keeps it loaded.
            Err(_) => unreachable!("ConfigGuard holds an empty loader"),
        }
    }
}

/// Declares a unit struct implementing [`GlobalLoader`](crate::GlobalLoader)
/// for a configuration type.
///
/// ```rust,ignore
/// keystone_config::global_loader! {
///     /// Loader for the service configuration.
///     pub struct ServiceLoader => ServiceConfig;
/// }
/// ```
#[macro_export]
macro_rules! global_loader {
    ($(#[$meta:meta])* $vis:vis struct $name:ident => $config:ty;) => {
        $(#[$meta])*
        $vis struct $name;

        impl $crate::GlobalLoader for $name {
            type Config = $config;

            fn slot() -> &'static ::std::sync::OnceLock<
                ::std::sync::RwLock<$crate::ConfigLoader<$config>>,
            > {
                static SLOT: ::std::sync::OnceLock<
                    ::std::sync::RwLock<$crate::ConfigLoader<$config>>,
                > = ::std::sync::OnceLock::new();
                &SLOT
            }
        }
    };
}
