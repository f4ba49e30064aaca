//! Snapshot document generation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use askama::Template;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use summarizer::{artifact, Recommendation};

use crate::error::Result;
use crate::view::{self, CardView};

/// The rendered snapshot page.
#[derive(Template)]
#[template(path = "snapshot.html")]
struct SnapshotTemplate {
    chat_id: String,
    tags: Vec<String>,
    cards: Vec<CardView>,
    recommendations: Vec<Recommendation>,
}

/// Renders a chat's current link collection (plus any persisted
/// recommendations) into a static HTML document.
///
/// Rendering reads complete state and replaces the whole document; it never
/// mutates link or tag state. Racing regenerations are last-writer-wins
/// over a single replace-target.
#[derive(Debug, Clone)]
pub struct SnapshotGenerator {
    storage_dir: PathBuf,
}

impl SnapshotGenerator {
    /// Create a generator writing documents into `storage_dir`.
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    /// The storage directory documents are written into.
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Stable path of the snapshot document for a chat.
    pub fn path_for(&self, chat_id: &str) -> PathBuf {
        self.storage_dir.join(format!("{}_history.html", chat_id))
    }

    /// Render the snapshot for a chat, overwriting any previous version.
    ///
    /// Missing recommendations render as an empty list. Returns the
    /// document path.
    pub async fn render(&self, pool: &SqlitePool, chat_id: &str) -> Result<PathBuf> {
        let links = database::link::list_links_with_tags(pool, chat_id).await?;
        let recommendations = artifact::load(&self.storage_dir, chat_id)
            .map(|set| set.recommendations)
            .unwrap_or_default();

        let now = Utc::now();
        let template = SnapshotTemplate {
            chat_id: chat_id.to_string(),
            tags: view::collect_tags(&links),
            cards: links
                .iter()
                .map(|entry| CardView::from_link(entry, now))
                .collect(),
            recommendations,
        };

        let html = template.render()?;
        let path = self.write_replacing(chat_id, &html)?;

        info!(
            "Rendered snapshot for chat {} ({} card(s)) at {}",
            chat_id,
            template.cards.len(),
            path.display()
        );
        Ok(path)
    }

    /// List rendered snapshot documents in the storage directory.
    pub fn list_documents(&self) -> Result<Vec<PathBuf>> {
        let mut documents = Vec::new();

        let entries = match fs::read_dir(&self.storage_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(documents),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "html") {
                documents.push(path);
            }
        }

        documents.sort();
        Ok(documents)
    }

    /// Write the document fully, then rename over the target so readers
    /// never observe a partial file. Racing writers get distinct temp
    /// files; whichever rename lands last wins.
    fn write_replacing(&self, chat_id: &str, html: &str) -> Result<PathBuf> {
        static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

        fs::create_dir_all(&self.storage_dir)?;

        let path = self.path_for(chat_id);
        let tmp = self.storage_dir.join(format!(
            "{}_history.html.{}.{}.tmp",
            chat_id,
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        fs::write(&tmp, html)?;
        fs::rename(&tmp, &path)?;

        debug!("Replaced snapshot document {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::{link, Database, NewLink};
    use summarizer::{Recommendation, RecommendationSet};

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn widget(chat_id: &str) -> NewLink {
        NewLink {
            chat_id: chat_id.to_string(),
            link: "https://amazon.example/item/123".to_string(),
            title: Some("Widget".to_string()),
            url: Some("https://amazon.example/item/123".to_string()),
            price: Some("19.99".to_string()),
            images: vec!["a.jpg".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_render_contains_cards_and_tags() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        let generator = SnapshotGenerator::new(dir.path());

        link::save_link(
            db.pool(),
            &widget("chat-1"),
            &["gift".to_string(), "tech".to_string()],
        )
        .await
        .unwrap();

        let path = generator.render(db.pool(), "chat-1").await.unwrap();
        let html = fs::read_to_string(&path).unwrap();

        assert!(html.contains("Widget"));
        assert!(html.contains("Price: $19.99"));
        assert!(html.contains("#gift"));
        assert!(html.contains("#tech"));
        assert_eq!(path, generator.path_for("chat-1"));
    }

    #[tokio::test]
    async fn test_render_is_idempotent() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        let generator = SnapshotGenerator::new(dir.path());

        link::save_link(db.pool(), &widget("chat-1"), &["tech".to_string()])
            .await
            .unwrap();

        let first = fs::read(generator.render(db.pool(), "chat-1").await.unwrap()).unwrap();
        let second = fs::read(generator.render(db.pool(), "chat-1").await.unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_render_empty_collection() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        let generator = SnapshotGenerator::new(dir.path());

        let path = generator.render(db.pool(), "chat-1").await.unwrap();
        let html = fs::read_to_string(&path).unwrap();

        // No cards, but the shell and filter bar still render.
        assert!(html.contains("tag-filters"));
        assert!(!html.contains("class=\"card\""));
    }

    #[tokio::test]
    async fn test_render_includes_recommendations() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        let generator = SnapshotGenerator::new(dir.path());

        link::save_link(db.pool(), &widget("chat-1"), &["tech".to_string()])
            .await
            .unwrap();

        let set = RecommendationSet {
            general: "You like gadgets.".to_string(),
            recommendations: vec![Recommendation {
                destination_tag: "tech".to_string(),
                title: "Another gadget".to_string(),
                link: "https://shop.example/g".to_string(),
            }],
        };
        artifact::store(dir.path(), "chat-1", &set).unwrap();

        let html = fs::read_to_string(generator.render(db.pool(), "chat-1").await.unwrap()).unwrap();

        assert!(html.contains("Another gadget"));
        assert!(html.contains("Suggested for #tech"));
    }

    #[tokio::test]
    async fn test_no_partial_documents_left_behind() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        let generator = SnapshotGenerator::new(dir.path());

        generator.render(db.pool(), "chat-1").await.unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_list_documents() {
        let db = test_db().await;
        let dir = tempfile::tempdir().unwrap();
        let generator = SnapshotGenerator::new(dir.path());

        assert!(generator.list_documents().unwrap().is_empty());

        generator.render(db.pool(), "chat-1").await.unwrap();
        generator.render(db.pool(), "chat-2").await.unwrap();

        let documents = generator.list_documents().unwrap();
        assert_eq!(documents.len(), 2);
    }
}
