//! Command implementations.
//!
//! Each command writes its report to the given writer and returns
//! `anyhow::Result` so failures carry the file context up to `main`.

pub mod inspect;
pub mod paths;
