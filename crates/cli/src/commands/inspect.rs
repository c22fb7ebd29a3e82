//! `inspect` command: list the leaves of a configuration document.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use keystone_config::document::{read_secrets, read_toml};
use tracing::info;

use crate::leaves::{self, Source};

/// Writes every leaf of `file`, followed by the redacted leaves of `secrets`.
pub fn run(file: &Path, secrets: Option<&Path>, json: bool, out: &mut impl Write) -> Result<()> {
    let config = read_toml(file)
        .with_context(|| format!("Failed to read configuration document {}", file.display()))?;
    let secrets = secrets
        .map(|path| {
            read_secrets(path)
                .with_context(|| format!("Failed to read secrets document {}", path.display()))
        })
        .transpose()?;

    let mut leaves = leaves::collect(&config, Source::Config);
    if let Some(secrets) = &secrets {
        leaves.extend(leaves::collect(secrets, Source::Secrets));
    }
    leaves.sort_by(|a, b| a.path.cmp(&b.path).then(a.source.cmp(&b.source)));
    info!(file = %file.display(), leaves = leaves.len(), "Document inspected");

    if json {
        serde_json::to_writer_pretty(&mut *out, &leaves)?;
        writeln!(out)?;
    } else {
        for leaf in &leaves {
            writeln!(out, "{leaf}")?;
        }
    }
    Ok(())
}
