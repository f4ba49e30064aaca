//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur while rendering a snapshot document.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Database error while reading link state.
    #[error("database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// Template rendering failed.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// Writing the document failed.
    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;
