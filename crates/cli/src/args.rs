//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read default document paths from `KEYSTONE_CONFIG` / `KEYSTONE_SECRETS`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keystone-cli")]
#[command(about = "Inspect Keystone configuration and secrets documents", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  keystone-cli inspect service.toml\n  keystone-cli inspect service.toml --secrets secrets.json --json\n  keystone-cli paths secrets.toml\n"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every leaf of a configuration document with its kind
    Inspect {
        /// Path to the TOML configuration document
        #[arg(env = "KEYSTONE_CONFIG", value_name = "FILE")]
        file: PathBuf,

        /// Secrets document (.toml or .json); its values are shown redacted
        #[arg(short, long, env = "KEYSTONE_SECRETS", value_name = "FILE")]
        secrets: Option<PathBuf>,

        /// Emit a JSON array instead of text lines
        #[arg(long)]
        json: bool,
    },

    /// List the dotted paths a secrets document would set
    Paths {
        /// Secrets document (.toml or .json)
        #[arg(env = "KEYSTONE_SECRETS", value_name = "SECRETS")]
        secrets: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_inspect_with_secrets() {
        let cli = Cli::try_parse_from([
            "keystone-cli",
            "inspect",
            "app.toml",
            "--secrets",
            "secrets.json",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Inspect {
                file,
                secrets,
                json,
            } => {
                assert_eq!(file, PathBuf::from("app.toml"));
                assert_eq!(secrets, Some(PathBuf::from("secrets.json")));
                assert!(json);
            }
            Commands::Paths { .. } => panic!("expected inspect"),
        }
    }

    #[test]
    fn test_parse_paths() {
        let cli = Cli::try_parse_from(["keystone-cli", "paths", "secrets.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Paths { secrets } if secrets == PathBuf::from("secrets.toml")));
    }
}
