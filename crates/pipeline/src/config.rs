//! Pipeline configuration.

use std::env;
use std::path::PathBuf;

use resolver::ResolverConfig;
use summarizer::SummaryConfig;

use crate::error::Result;

/// Default SQLite database URL.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:linkstash.db?mode=rwc";

/// Default storage directory for snapshots and summary artifacts.
pub const DEFAULT_STORAGE_DIR: &str = "storage/links_history";

/// Configuration for [`Pipeline`](crate::Pipeline).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// SQLite database URL.
    pub database_url: String,

    /// Directory holding snapshot documents and summary artifacts.
    pub storage_dir: PathBuf,

    /// Metadata resolver configuration.
    pub resolver: ResolverConfig,

    /// Summary engine configuration.
    pub summary: SummaryConfig,
}

impl PipelineConfig {
    /// Create configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:linkstash.db?mode=rwc` |
    /// | `STORAGE_DIR` | Snapshot/artifact directory | `storage/links_history` |
    ///
    /// Resolver and summary settings come from [`ResolverConfig::from_env`]
    /// and [`SummaryConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let storage_dir = env::var("STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_DIR));

        Ok(Self {
            database_url,
            storage_dir,
            resolver: ResolverConfig::from_env()?,
            summary: SummaryConfig::from_env()?,
        })
    }
}
