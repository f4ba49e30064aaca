//! Domain-aware link metadata resolution.
//!
//! Given a submitted URL, this crate produces a normalized [`Metadata`]
//! record via one of two strategies:
//!
//! - [`Strategy::Marketplace`] — a third-party product scraping API, for
//!   URLs carrying the marketplace marker
//! - [`Strategy::OpenGraph`] — generic Open-Graph extraction through an
//!   unblocking proxy, for everything else
//!
//! Resolution is total: timeouts, transport failures, and malformed
//! responses all degrade to placeholder records instead of erroring, so a
//! submission can always be stored.
//!
//! # Example
//!
//! ```no_run
//! use resolver::{MetadataResolver, ResolverConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = MetadataResolver::new(
//!         ResolverConfig::builder().api_secret("secret").build(),
//!     )?;
//!
//!     let metadata = resolver.resolve("https://example.com/article").await;
//!     println!("{}", metadata.title);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
pub mod marketplace;
mod metadata;
pub mod opengraph;
mod resolver;
mod strategy;

pub use config::{ResolverConfig, ResolverConfigBuilder, DEFAULT_API_URL, SECRET_HEADER};
pub use error::ResolverError;
pub use metadata::Metadata;
pub use resolver::MetadataResolver;
pub use strategy::{Strategy, MARKETPLACE_MARKER};
