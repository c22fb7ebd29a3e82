//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Invariants:
//! - Commands write their reports to stdout only.

use std::io::{self, Write};

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;

pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Inspect {
            file,
            secrets,
            json,
        } => commands::inspect::run(&file, secrets.as_deref(), json, &mut out)?,
        Commands::Paths { secrets } => commands::paths::run(&secrets, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
