//! CLI-level errors (wraps application errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Usage(String),

    #[error("no printers in config: {}", .0.display())]
    NoPrinters(PathBuf),

    #[error("{failed} of {total} printer(s) failed")]
    PartialFailure { failed: usize, total: usize },
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Application(ApplicationError::Domain(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::NoPrinters(_) => crate::exitcode::NOINPUT,
            CliError::PartialFailure { .. } => crate::exitcode::UNAVAILABLE,
            CliError::Application(e) if e.is_config() => crate::exitcode::CONFIG,
            CliError::Application(ApplicationError::Domain(e)) if e.is_selection() => {
                crate::exitcode::DATAERR
            }
            // left: out-of-range delays given on the command line
            CliError::Application(_) => crate::exitcode::USAGE,
        }
    }
}
