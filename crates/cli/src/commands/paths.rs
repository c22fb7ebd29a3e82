//! `paths` command: list the secret paths a secrets document sets.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use keystone_config::document::read_secrets;
use tracing::warn;

use crate::leaves::{self, Source};

pub fn run(secrets: &Path, out: &mut impl Write) -> Result<()> {
    let table = read_secrets(secrets)
        .with_context(|| format!("Failed to read secrets document {}", secrets.display()))?;

    for leaf in leaves::collect(&table, Source::Secrets) {
        if leaf.kind != "string" {
            warn!(path = %leaf.path, kind = leaf.kind, "Secret value is not a string");
        }
        writeln!(out, "{}", leaf.path)?;
    }
    Ok(())
}
