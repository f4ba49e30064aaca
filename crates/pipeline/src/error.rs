//! Pipeline error types.

use database::{DatabaseError, ValidationError};
use resolver::ResolverError;
use snapshot::SnapshotError;
use summarizer::SummaryError;
use thiserror::Error;

/// Errors that can occur during pipeline operations.
///
/// Metadata resolution never appears here: scraping failures degrade to
/// placeholder metadata and the submission continues.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Rejected input.
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    /// Storage error (including not-found conditions).
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Summarization error.
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// Snapshot rendering error.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Resolver construction error.
    #[error(transparent)]
    Resolver(#[from] ResolverError),
}

impl From<ValidationError> for PipelineError {
    fn from(e: ValidationError) -> Self {
        PipelineError::InvalidSubmission(e.to_string())
    }
}

impl PipelineError {
    /// Whether this error is a missing-record condition (a 404-equivalent
    /// for callers), as opposed to a server-side failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            PipelineError::Database(e) => e.is_not_found(),
            PipelineError::Summary(SummaryError::NoLinks { .. }) => true,
            PipelineError::Snapshot(SnapshotError::Database(e)) => e.is_not_found(),
            _ => false,
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
