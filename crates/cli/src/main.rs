//! Keystone CLI - inspect configuration and secrets documents.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Initialize logging on stderr so stdout stays machine-readable.
//! - Run the selected command and map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Parsing documents or walking value trees (see `keystone-config` and `leaves`).
//!
//! Invariants:
//! - Secret values are never written to stdout or stderr.

mod args;
mod commands;
mod dispatch;
mod error;
mod leaves;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
