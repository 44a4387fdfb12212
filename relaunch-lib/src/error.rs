use std::path::PathBuf;

use relaunch_db::DbError;
use thiserror::Error;

/// Errors raised by the workflows in this crate.
#[derive(Debug, Error)]
pub enum LibError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("No installed product with release key {0}")]
    ProductNotFound(String),

    #[error("No primary launch task for release key {0}")]
    NoPrimaryTask(String),

    #[error("No launch parameters stored for task {0}")]
    NoLaunchParameters(i64),

    #[error("Runtime executable not found: {}", .0.display())]
    RuntimeNotFound(PathBuf),

    #[error("No backup found for {}", .0.display())]
    NoBackup(PathBuf),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl LibError {
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}
