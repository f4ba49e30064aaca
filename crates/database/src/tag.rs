//! Tag find-or-create and orphan pruning.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::Result;
use crate::models::Tag;

/// Look up a tag by exact name, creating it when absent.
///
/// Lookups use the column's default BINARY collation, so "Tech" and "tech"
/// are distinct tags. Calling this repeatedly with the same name returns the
/// same row; a lost insert race re-reads the winner's row instead of failing.
pub async fn ensure(pool: &SqlitePool, name: &str) -> Result<Tag> {
    let mut conn = pool.acquire().await?;
    ensure_with(&mut conn, name).await
}

/// Same as [`ensure`], against an explicit connection so callers can run it
/// inside a transaction.
pub async fn ensure_with(conn: &mut SqliteConnection, name: &str) -> Result<Tag> {
    if let Some(tag) = find_by_name(conn, name).await? {
        return Ok(tag);
    }

    let insert = sqlx::query(
        r#"
        INSERT INTO tags (name)
        VALUES (?)
        "#,
    )
    .bind(name)
    .execute(&mut *conn)
    .await;

    match insert {
        Ok(result) => {
            debug!("Created tag {:?} (id {})", name, result.last_insert_rowid());
            Ok(Tag {
                id: result.last_insert_rowid(),
                name: name.to_string(),
            })
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            // Another writer got there first; its row is the tag.
            match find_by_name(conn, name).await? {
                Some(tag) => Ok(tag),
                None => Err(sqlx::Error::RowNotFound.into()),
            }
        }
        Err(e) => Err(e.into()),
    }
}

async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>(
        r#"
        SELECT id, name
        FROM tags
        WHERE name = ?
        "#,
    )
    .bind(name)
    .fetch_optional(conn)
    .await?;

    Ok(tag)
}

/// Delete every tag with no remaining link associations.
///
/// Links are the only tagged entity in this schema, so "no link associations"
/// is the orphan condition. Returns the number of tags pruned.
pub async fn prune_orphans(pool: &SqlitePool) -> Result<u64> {
    let mut conn = pool.acquire().await?;
    prune_orphans_with(&mut conn).await
}

/// Same as [`prune_orphans`], against an explicit connection so deletion and
/// pruning can share a transaction.
pub async fn prune_orphans_with(conn: &mut SqliteConnection) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM tags
        WHERE id NOT IN (SELECT tag_id FROM link_tags)
        "#,
    )
    .execute(conn)
    .await?;

    let pruned = result.rows_affected();
    if pruned > 0 {
        debug!("Pruned {} orphaned tag(s)", pruned);
    }
    Ok(pruned)
}

/// List all tags ordered by name.
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT id, name
        FROM tags
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let db = test_db().await;

        let first = ensure(db.pool(), "tech").await.unwrap();
        let second = ensure(db.pool(), "tech").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(list_tags(db.pool()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_is_case_sensitive() {
        let db = test_db().await;

        let lower = ensure(db.pool(), "gift").await.unwrap();
        let upper = ensure(db.pool(), "Gift").await.unwrap();

        assert_ne!(lower.id, upper.id);
        assert_eq!(list_tags(db.pool()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_prune_removes_unassociated_tags() {
        let db = test_db().await;

        ensure(db.pool(), "dangling").await.unwrap();
        let pruned = prune_orphans(db.pool()).await.unwrap();

        assert_eq!(pruned, 1);
        assert!(list_tags(db.pool()).await.unwrap().is_empty());
    }
}
