//! The capture and summarization pipeline.

use std::path::PathBuf;

use tracing::{error, info};

use database::{link, validation, Database, NewLink};
use resolver::{Metadata, MetadataResolver};
use snapshot::SnapshotGenerator;
use summarizer::{RecommendationSet, SummaryEngine};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::message::{self, ParsedSubmission};

/// Outcome of a link submission.
#[derive(Debug)]
pub struct Submission {
    /// ID of the stored link.
    pub link_id: i64,
    /// Metadata the link was stored with (possibly degraded placeholders).
    pub metadata: Metadata,
    /// Path of the regenerated snapshot, when regeneration succeeded.
    pub snapshot: Option<PathBuf>,
}

/// Coordinates resolution, storage, summarization, and snapshot
/// regeneration for one chat-scoped operation at a time.
///
/// Every mutating operation regenerates the owner's snapshot before
/// returning. Regeneration failures after a committed write are logged and
/// reported in the outcome; they never roll back the committed state.
pub struct Pipeline {
    db: Database,
    resolver: MetadataResolver,
    summarizer: SummaryEngine,
    snapshot: SnapshotGenerator,
}

impl Pipeline {
    /// Create a pipeline from its parts.
    pub fn new(
        db: Database,
        resolver: MetadataResolver,
        summarizer: SummaryEngine,
        snapshot: SnapshotGenerator,
    ) -> Self {
        Self {
            db,
            resolver,
            summarizer,
            snapshot,
        }
    }

    /// Connect, migrate, and assemble a pipeline from configuration.
    pub async fn from_config(config: PipelineConfig) -> Result<Self> {
        let db = Database::connect(&config.database_url).await?;
        db.migrate().await?;

        let resolver = MetadataResolver::new(config.resolver)?;
        let summarizer = SummaryEngine::new(config.summary, &config.storage_dir)?;
        let snapshot = SnapshotGenerator::new(&config.storage_dir);

        Ok(Self::new(db, resolver, summarizer, snapshot))
    }

    /// The underlying database handle.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// The snapshot generator.
    pub fn snapshot(&self) -> &SnapshotGenerator {
        &self.snapshot
    }

    /// Capture a link: resolve metadata, store the link with its tags, and
    /// regenerate the owner's snapshot.
    ///
    /// Resolution is total, so a submission always stores a link; only
    /// validation and storage failures error.
    pub async fn submit(&self, chat_id: &str, url: &str, tags: &[String]) -> Result<Submission> {
        validation::validate_chat_id(chat_id)?;
        validation::validate_url(url)?;
        for tag in tags {
            validation::validate_tag_name(tag)?;
        }

        let metadata = self.resolver.resolve(url).await;
        self.store_resolved(chat_id, url, tags, metadata).await
    }

    /// Store a link whose metadata has already been resolved, then
    /// regenerate the owner's snapshot.
    pub async fn store_resolved(
        &self,
        chat_id: &str,
        url: &str,
        tags: &[String],
        metadata: Metadata,
    ) -> Result<Submission> {
        let new = NewLink {
            chat_id: chat_id.to_string(),
            link: url.to_string(),
            title: Some(metadata.title.clone()),
            description: metadata.description.clone(),
            url: Some(metadata.url.clone()),
            price: metadata.price.clone(),
            images: metadata.images.clone(),
            site_name: metadata.site_name.clone(),
        };

        let link_id = link::save_link(self.db.pool(), &new, tags).await?;
        let snapshot = self.regenerate(chat_id).await;

        info!("Captured link {} for chat {}", link_id, chat_id);
        Ok(Submission {
            link_id,
            metadata,
            snapshot,
        })
    }

    /// Parse a raw chat message (`<url> #tag ...`) and capture it.
    pub async fn submit_message(&self, chat_id: &str, text: &str) -> Result<Submission> {
        let ParsedSubmission { url, tags } = message::parse_submission(text)?;
        self.submit(chat_id, &url, &tags).await
    }

    /// Add a tag to an existing link and regenerate the owner's snapshot.
    pub async fn add_tag(&self, link_id: i64, tag_name: &str) -> Result<Option<PathBuf>> {
        validation::validate_tag_name(tag_name)?;

        let owner = link::get_link(self.db.pool(), link_id).await?.chat_id;
        link::add_tag(self.db.pool(), link_id, tag_name).await?;

        Ok(self.regenerate(&owner).await)
    }

    /// Delete a link and regenerate the owner's snapshot.
    pub async fn delete(&self, link_id: i64) -> Result<Option<PathBuf>> {
        let owner = link::get_link(self.db.pool(), link_id).await?.chat_id;
        link::delete_link(self.db.pool(), link_id).await?;

        Ok(self.regenerate(&owner).await)
    }

    /// Delete all of a chat's links and regenerate its (now empty)
    /// snapshot.
    pub async fn delete_all(&self, chat_id: &str) -> Result<Option<PathBuf>> {
        validation::validate_chat_id(chat_id)?;

        link::delete_all(self.db.pool(), chat_id).await?;
        Ok(self.regenerate(chat_id).await)
    }

    /// Summarize a chat's history into recommendations and regenerate its
    /// snapshot with them included.
    pub async fn summarize(&self, chat_id: &str) -> Result<RecommendationSet> {
        validation::validate_chat_id(chat_id)?;

        let set = self.summarizer.summarize(self.db.pool(), chat_id).await?;
        self.regenerate(chat_id).await;

        Ok(set)
    }

    /// Regenerate a chat's snapshot, reporting failure without propagating:
    /// the storage mutation that triggered this is already committed.
    async fn regenerate(&self, chat_id: &str) -> Option<PathBuf> {
        match self.snapshot.render(self.db.pool(), chat_id).await {
            Ok(path) => Some(path),
            Err(e) => {
                error!("Snapshot regeneration failed for chat {}: {}", chat_id, e);
                None
            }
        }
    }
}
