//! CLI-level errors (wraps catalog and config errors)

use thiserror::Error;

use crate::errors::CatalogError;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exitcode::USAGE,
            CliError::Config(_) => exitcode::CONFIG,
            CliError::Io(_) => exitcode::IOERR,
            CliError::Catalog(e) => match e {
                CatalogError::Io(_) => exitcode::NOINPUT,
                CatalogError::MalformedRow { .. } => exitcode::DATAERR,
                CatalogError::Tree(_) => exitcode::DATAERR,
            },
        }
    }
}
