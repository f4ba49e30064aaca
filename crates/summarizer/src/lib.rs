//! AI link-history summarization for Linkstash.
//!
//! This crate aggregates a chat's saved links into a prompt, asks a
//! chat-completion API for structured recommendations, and persists the
//! parsed result as a per-chat JSON artifact:
//!
//! - [`SummaryEngine`] — loads history, calls the model, stores the result
//! - [`RecommendationSet`] / [`Recommendation`] — the structured artifact
//! - [`artifact`] — wholesale-replace persistence keyed by chat ID
//!
//! Model output is untrusted: fenced code blocks are stripped and parse
//! failures degrade to an `"Error in parsing"` set rather than erroring.
//! Only an empty history, storage failures, and artifact I/O surface as
//! errors.

mod analysis;
pub mod api_types;
pub mod artifact;
mod config;
mod engine;
mod error;
pub mod prompt;

pub use analysis::{clean_json_block, parse_analysis, Recommendation, RecommendationSet, PARSE_ERROR_GENERAL};
pub use config::{SummaryConfig, SummaryConfigBuilder, DEFAULT_API_URL, DEFAULT_MODEL};
pub use engine::SummaryEngine;
pub use error::{Result, SummaryError};
