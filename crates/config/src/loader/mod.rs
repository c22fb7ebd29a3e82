//! Configuration loader and process-wide singleton.
//!
//! Responsibilities:
//! - Own zero or one bound configuration tree (`ConfigLoader`).
//! - Load it from a TOML file or install an already-built instance.
//! - Route secrets documents and dotted-path secrets into the held tree.
//! - Provide one lazily created loader per configuration type (`GlobalLoader`).
//!
//! Does NOT handle:
//! - Parsing (see `document`), binding (see `bind`) or injection rules (see `inject`).
//!
//! Invariants / Assumptions:
//! - `config()` fails with `ConfigNotLoaded` until a load succeeds.
//! - A failed `load_file` leaves the loader exactly as it was.
//! - A failed `load_secrets` keeps the installed tree, including secrets
//!   applied before the failure.
//! - Singleton creation is guarded by `OnceLock`; access goes through an `RwLock`.

mod global;
mod instance;

pub use global::{ConfigGuard, GlobalLoader};
pub use instance::ConfigLoader;

#[cfg(test)]
mod tests;
