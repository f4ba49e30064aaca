//! Link capture and summarization pipeline for Linkstash.
//!
//! This crate wires the concern crates into the two user-facing flows:
//!
//! ```text
//! submit(chat_id, url, tags)
//!          ↓
//! ┌────────────────────────────────────────────────────┐
//! │                     PIPELINE                       │
//! │                                                    │
//! │  1. Resolve metadata (marketplace API or           │
//! │     Open-Graph fallback; degrades, never fails)    │
//! │          ↓                                         │
//! │  2. Store link + deduplicated tags (one            │
//! │     transaction; commit or roll back as a unit)    │
//! │          ↓                                         │
//! │  3. Regenerate the owner's HTML snapshot           │
//! │     (reported on failure, never rolls back 2)      │
//! └────────────────────────────────────────────────────┘
//!
//! summarize(chat_id)
//!          ↓
//!   load history → model call → parse (degrades) →
//!   persist recommendation artifact → regenerate snapshot
//! ```
//!
//! `add_tag`, `delete`, and `delete_all` follow the same shape: a storage
//! mutation followed by snapshot regeneration for the affected chat.

mod config;
mod error;
mod message;
mod pipeline;

pub use config::{PipelineConfig, DEFAULT_DATABASE_URL, DEFAULT_STORAGE_DIR};
pub use error::{PipelineError, Result};
pub use message::{parse_submission, ParsedSubmission};
pub use pipeline::{Pipeline, Submission};
