//! # lit-db
//!
//! libSQL storage for the litgraph reading list and its entity links.
//!
//! Holds two tables: `reading_list` (one row per item) and
//! `literature_entity_links` (one row per item/entity pair). Links cascade on
//! item delete. Link mutations are optionally mirrored to a JSONL trail.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod trail;

#[doc(hidden)]
pub mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle: a libSQL database plus its single connection.
pub struct LitDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl LitDb {
    /// Open a local database at the given path (`:memory:` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:" {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Other(e.into()))?;
                }
            }
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Foreign keys are per-connection in SQLite; the link cascade needs them.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let lit_db = Self { db, conn };
        lit_db.run_migrations().await?;
        tracing::debug!(path, "opened literature database");
        Ok(lit_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> LitDb {
        LitDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        for table in ["reading_list", "literature_entity_links"] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            assert!(rows.next().await.unwrap().is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn link_indices_exist() {
        let db = test_db().await;
        for index in [
            "idx_entity_links_entity",
            "idx_entity_links_context",
            "idx_entity_links_relation",
        ] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='index' AND name=?1",
                    [index],
                )
                .await
                .unwrap();
            assert!(rows.next().await.unwrap().is_some(), "index '{index}' should exist");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn relation_type_check_constraint() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO reading_list (literature_id, source, added_date) VALUES ('custom:p1', 'custom', '2024-01-01')",
                (),
            )
            .await
            .unwrap();
        let result = db
            .conn()
            .execute(
                "INSERT INTO literature_entity_links (literature_id, entity_name, relation_type, created_at)
                 VALUES ('custom:p1', 'gpt', 'ponders', '2024-01-01')",
                (),
            )
            .await;
        assert!(result.is_err(), "CHECK constraint should reject unknown relation types");
    }

    #[tokio::test]
    async fn link_requires_existing_item() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO literature_entity_links (literature_id, entity_name, relation_type, created_at)
                 VALUES ('custom:ghost', 'gpt', 'discusses', '2024-01-01')",
                (),
            )
            .await;
        assert!(result.is_err(), "foreign key should reject links to missing items");
    }

    #[tokio::test]
    async fn file_database_creates_parent_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("literature.db");
        let db = LitDb::open_local(path.to_str().unwrap()).await.unwrap();
        drop(db);
        assert!(path.exists());
    }
}
