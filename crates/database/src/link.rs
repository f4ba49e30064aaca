//! Link CRUD operations and tag associations.

use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DatabaseError, Result};
use crate::models::{Link, LinkWithTags, NewLink, Tag};
use crate::tag;

/// Insert a link and associate it with the given tags, atomically.
///
/// Either the link row and all of its tag associations commit together, or
/// the transaction rolls back and nothing persists. Returns the new link ID.
pub async fn save_link(pool: &SqlitePool, new: &NewLink, tags: &[String]) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO links (chat_id, link, title, description, url, price, images, site_name)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new.chat_id)
    .bind(&new.link)
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.url)
    .bind(&new.price)
    .bind(Json(&new.images))
    .bind(&new.site_name)
    .execute(&mut *tx)
    .await?;

    let link_id = result.last_insert_rowid();

    for name in tags {
        let tag = tag::ensure_with(&mut tx, name).await?;
        associate(&mut tx, link_id, tag.id).await?;
    }

    tx.commit().await?;

    info!("Saved link {} for chat {}", link_id, new.chat_id);
    Ok(link_id)
}

/// Get a link by ID.
pub async fn get_link(pool: &SqlitePool, link_id: i64) -> Result<Link> {
    sqlx::query_as::<_, Link>(
        r#"
        SELECT id, chat_id, link, title, description, url, price, images, site_name, created_at
        FROM links
        WHERE id = ?
        "#,
    )
    .bind(link_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Link",
        id: link_id.to_string(),
    })
}

/// List a chat's links ordered by creation time ascending.
pub async fn list_links(pool: &SqlitePool, chat_id: &str) -> Result<Vec<Link>> {
    let links = sqlx::query_as::<_, Link>(
        r#"
        SELECT id, chat_id, link, title, description, url, price, images, site_name, created_at
        FROM links
        WHERE chat_id = ?
        ORDER BY created_at, id
        "#,
    )
    .bind(chat_id)
    .fetch_all(pool)
    .await?;

    Ok(links)
}

/// Tag names for a link, sorted ascending.
pub async fn tags_for_link(pool: &SqlitePool, link_id: i64) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT t.name
        FROM tags t
        INNER JOIN link_tags lt ON lt.tag_id = t.id
        WHERE lt.link_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(link_id)
    .fetch_all(pool)
    .await?;

    Ok(names)
}

/// A chat's links with their tag names, ordered by creation time ascending.
///
/// This is the read model for snapshot rendering and summarization.
pub async fn list_links_with_tags(pool: &SqlitePool, chat_id: &str) -> Result<Vec<LinkWithTags>> {
    let links = list_links(pool, chat_id).await?;

    let mut out = Vec::with_capacity(links.len());
    for link in links {
        let tags = tags_for_link(pool, link.id).await?;
        out.push(LinkWithTags { link, tags });
    }

    Ok(out)
}

/// Ensure a tag exists and associate it with the link.
///
/// No-op when the association is already present. Fails with `NotFound`
/// when the link does not exist.
pub async fn add_tag(pool: &SqlitePool, link_id: i64, tag_name: &str) -> Result<Tag> {
    // Existence check up front so a missing link is a 404, not a FK error.
    get_link(pool, link_id).await?;

    let mut tx = pool.begin().await?;
    let tag = tag::ensure_with(&mut tx, tag_name).await?;
    associate(&mut tx, link_id, tag.id).await?;
    tx.commit().await?;

    debug!("Tagged link {} with {:?}", link_id, tag_name);
    Ok(tag)
}

/// Delete a link, its tag associations, and any tags left orphaned.
pub async fn delete_link(pool: &SqlitePool, link_id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        DELETE FROM links
        WHERE id = ?
        "#,
    )
    .bind(link_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Link",
            id: link_id.to_string(),
        });
    }

    tag::prune_orphans_with(&mut tx).await?;
    tx.commit().await?;

    info!("Deleted link {}", link_id);
    Ok(())
}

/// Delete all of a chat's links and any tags left orphaned.
///
/// Returns the number of links deleted; fails with `NotFound` when the chat
/// has none.
pub async fn delete_all(pool: &SqlitePool, chat_id: &str) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        DELETE FROM links
        WHERE chat_id = ?
        "#,
    )
    .bind(chat_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Link",
            id: chat_id.to_string(),
        });
    }

    tag::prune_orphans_with(&mut tx).await?;
    tx.commit().await?;

    info!(
        "Deleted {} link(s) for chat {}",
        result.rows_affected(),
        chat_id
    );
    Ok(result.rows_affected())
}

/// Insert a (link, tag) association unless it already exists.
async fn associate(conn: &mut SqliteConnection, link_id: i64, tag_id: i64) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO link_tags (link_id, tag_id)
        VALUES (?, ?)
        "#,
    )
    .bind(link_id)
    .bind(tag_id)
    .execute(conn)
    .await?;

    Ok(())
}
