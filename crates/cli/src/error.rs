//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ConfigError` variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit code 2 is left to clap for usage errors.

use keystone_config::ConfigError;

/// Structured exit codes for keystone-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// A document could not be read (missing file, permissions).
    NotFound = 3,

    /// A document was read but is not valid TOML/JSON, has the wrong
    /// top-level shape, or has an unsupported extension.
    InvalidDocument = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::FileNotFound { .. } => ExitCode::NotFound,
            ConfigError::Parse { .. }
            | ConfigError::Schema { .. }
            | ConfigError::UnsupportedFormat { .. } => ExitCode::InvalidDocument,
            ConfigError::Validation(_)
            | ConfigError::ConfigNotLoaded
            | ConfigError::SecretsNotLoaded
            | ConfigError::Path { .. }
            | ConfigError::NoSourcePath => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no `ConfigError` is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map_or(ExitCode::GeneralError, ExitCode::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use keystone_config::Format;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::NotFound.as_i32(), 3);
        assert_eq!(ExitCode::InvalidDocument.as_i32(), 4);
    }

    #[test]
    fn test_from_config_error_not_found() {
        let err = ConfigError::FileNotFound {
            path: PathBuf::from("missing.toml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(ExitCode::from(&err), ExitCode::NotFound);
    }

    #[test]
    fn test_from_config_error_parse() {
        let err = ConfigError::Parse {
            origin: "app.toml".to_string(),
            format: Format::Toml,
            message: "expected `=`".to_string(),
        };
        assert_eq!(ExitCode::from(&err), ExitCode::InvalidDocument);
    }

    #[test]
    fn test_exit_code_found_through_context() {
        let result: Result<(), ConfigError> = Err(ConfigError::Schema {
            path: PathBuf::from("secrets.json"),
            found: "array",
        });
        let err = result.context("Failed to read secrets document").unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::InvalidDocument);
    }

    #[test]
    fn test_other_errors_are_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
