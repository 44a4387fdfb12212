use std::path::Path;

use relaunch_db::DbError;
use relaunch_lib::LibError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// The file opened but is not a launcher database
    #[error("Not a valid GOG Galaxy database: {0}")]
    InvalidDatabase(String),

    /// Workflow error from the library
    #[error("{0}")]
    Lib(#[from] LibError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Bad combination of arguments
    #[error("{0}")]
    Usage(String),
}

impl From<DbError> for CliError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::UnsupportedEngine(_) => Self::Config(e.to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

impl CliError {
    pub(crate) fn invalid_database(path: &Path) -> Self {
        Self::InvalidDatabase(path.display().to_string())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}
