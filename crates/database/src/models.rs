//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A saved link, owned by the chat that submitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Link {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Chat identifier of the owning user.
    pub chat_id: String,
    /// Raw URL as submitted.
    pub link: String,
    /// Resolved page or product title.
    pub title: Option<String>,
    /// Resolved description.
    pub description: Option<String>,
    /// Resolved canonical URL.
    pub url: Option<String>,
    /// Free-text price, currency-agnostic.
    pub price: Option<String>,
    /// Ordered image URLs, stored as a JSON array.
    pub images: Json<Vec<String>>,
    /// Resolved site name.
    pub site_name: Option<String>,
    /// Server-assigned creation timestamp (UTC, millisecond precision).
    pub created_at: String,
}

impl Link {
    /// Best URL to point a reader at: the resolved canonical URL when the
    /// scraper found one, otherwise the raw submission.
    pub fn target_url(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.link)
    }
}

/// A tag. Names are globally unique and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Unique tag name.
    pub name: String,
}

/// Metadata for a link about to be inserted.
///
/// Produced by the resolution layer; every field is best-effort and may be
/// a placeholder when scraping degraded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLink {
    pub chat_id: String,
    pub link: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub price: Option<String>,
    pub images: Vec<String>,
    pub site_name: Option<String>,
}

/// A link together with its tag names, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkWithTags {
    pub link: Link,
    pub tags: Vec<String>,
}
