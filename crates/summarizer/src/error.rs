//! Summarizer error types.

use thiserror::Error;

/// Errors that can occur during summarization.
///
/// Model-output and transport problems are absorbed into a degraded
/// [`RecommendationSet`](crate::RecommendationSet) and never surface here;
/// only missing data, storage failures, and artifact I/O do.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The user has no saved links to summarize.
    #[error("no links found for chat {chat_id}")]
    NoLinks { chat_id: String },

    /// Database error while loading link history.
    #[error("database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// Failed to persist the recommendation artifact.
    #[error("failed to persist summary artifact: {0}")]
    Persist(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for summarizer operations.
pub type Result<T> = std::result::Result<T, SummaryError>;
