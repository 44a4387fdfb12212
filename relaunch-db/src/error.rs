use std::path::PathBuf;

use relaunch_core::{FieldKind, RecordKind};
use thiserror::Error;

/// Errors raised by the query engine and the domain access layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Native store error, message passed through verbatim.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// No connection, or the connected file is not a valid launcher database.
    #[error("Database connection is not open")]
    NotOpen,

    #[error("Unsupported database engine: {0}")]
    UnsupportedEngine(String),

    #[error("Missing value for SQL parameter: {0}")]
    MissingParameter(String),

    #[error("Missing column '{column}' for {record} record")]
    MissingColumn {
        record: RecordKind,
        column: &'static str,
    },

    #[error("Column '{column}' of {record} record holds {found}, expected {expected}")]
    TypeMismatch {
        record: RecordKind,
        column: &'static str,
        expected: FieldKind,
        found: &'static str,
    },

    /// The insert went through but its generated id could not be read back.
    #[error("Failed to get the id of the new {0}")]
    MissingInsertId(RecordKind),
}

impl DbError {
    pub fn unsupported_engine(name: impl Into<String>) -> Self {
        Self::UnsupportedEngine(name.into())
    }

    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }
}
