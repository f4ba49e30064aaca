//! Resolver error types.

use thiserror::Error;

/// Errors that can occur while constructing or configuring a resolver.
///
/// Resolution itself never errors: failures degrade to placeholder
/// [`Metadata`](crate::Metadata).
#[derive(Debug, Error)]
pub enum ResolverError {
    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
