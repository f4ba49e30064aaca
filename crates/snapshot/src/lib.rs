//! Static HTML snapshot rendering for Linkstash.
//!
//! A snapshot is the rendered, disposable document representing one chat's
//! current link collection plus any persisted recommendations. It is
//! derived state: regenerated in full after every mutation, addressable at
//! a stable per-chat path, and never a source of truth.
//!
//! # Example
//!
//! ```no_run
//! use snapshot::SnapshotGenerator;
//!
//! # async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! let generator = SnapshotGenerator::new("storage/links_history");
//! let path = generator.render(pool, "995527624").await?;
//! println!("snapshot at {}", path.display());
//! # Ok(())
//! # }
//! ```

mod error;
mod generator;
pub mod view;

pub use error::{Result, SnapshotError};
pub use generator::SnapshotGenerator;
