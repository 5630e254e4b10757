//! Reading-list item repository.

use chrono::Utc;

use lit_core::entities::{Item, NewItem};
use lit_core::enums::ItemStatus;
use lit_core::errors::CoreError;
use lit_core::ids::LiteratureId;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, parse_datetime, parse_enum};
use crate::service::LitService;

const ITEM_COLUMNS: &str =
    "literature_id, source, title, status, importance, notes, added_date";

fn row_to_item(row: &libsql::Row) -> Result<Item, DatabaseError> {
    Ok(Item {
        id: row.get::<String>(0)?,
        source: parse_enum(&row.get::<String>(1)?)?,
        title: get_opt_string(row, 2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        importance: row.get::<i64>(4)?,
        notes: get_opt_string(row, 5)?,
        added_date: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Reject importance values outside 1..=5.
pub(crate) fn validate_importance(importance: i64) -> Result<(), CoreError> {
    if (1..=5).contains(&importance) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "importance must be between 1 and 5, got {importance}"
        )))
    }
}

impl LitService {
    /// Add an item to the reading list.
    ///
    /// The id is normalized (`paper1` becomes `custom:paper1`, the source
    /// prefix is lower-cased).
    ///
    /// # Errors
    ///
    /// `Core(Validation)` for a malformed id or importance out of range,
    /// `InvalidState` if the id is already present.
    pub async fn add_item(&self, new: NewItem) -> Result<Item, DatabaseError> {
        let id = LiteratureId::parse(&new.id)?;
        validate_importance(new.importance)?;

        let full_id = id.full_id();
        if self.item_exists(&full_id).await? {
            return Err(DatabaseError::InvalidState(format!(
                "item '{full_id}' is already in the reading list"
            )));
        }

        let item = Item {
            id: full_id,
            source: id.source,
            title: new.title,
            status: new.status,
            importance: new.importance,
            notes: new.notes,
            added_date: new.added_date.unwrap_or_else(Utc::now),
        };

        self.db()
            .conn()
            .execute(
                "INSERT INTO reading_list (literature_id, source, title, status, importance, notes, added_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    item.id.as_str(),
                    item.source.as_str(),
                    item.title.as_deref(),
                    item.status.as_str(),
                    item.importance,
                    item.notes.as_deref(),
                    format_datetime(&item.added_date)
                ],
            )
            .await?;

        tracing::debug!(id = %item.id, importance = item.importance, "added item");
        Ok(item)
    }

    /// Fetch one item by id. The id is normalized before lookup.
    ///
    /// # Errors
    ///
    /// `Core(NotFound)` when no such item exists.
    pub async fn get_item(&self, id: &str) -> Result<Item, DatabaseError> {
        let full_id = LiteratureId::parse(id)?.full_id();
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {ITEM_COLUMNS} FROM reading_list WHERE literature_id = ?1"),
                [full_id.as_str()],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::item_not_found(&full_id))?;
        row_to_item(&row)
    }

    /// Whether an item with this exact stored id exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn item_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM reading_list WHERE literature_id = ?1",
                [id],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// List items, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_items(
        &self,
        status: Option<ItemStatus>,
        limit: u32,
    ) -> Result<Vec<Item>, DatabaseError> {
        let mut rows = match status {
            Some(status) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {ITEM_COLUMNS} FROM reading_list WHERE status = ?1
                             ORDER BY added_date DESC, literature_id LIMIT ?2"
                        ),
                        libsql::params![status.as_str(), i64::from(limit)],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {ITEM_COLUMNS} FROM reading_list
                             ORDER BY added_date DESC, literature_id LIMIT ?1"
                        ),
                        [i64::from(limit)],
                    )
                    .await?
            }
        };

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row)?);
        }
        Ok(items)
    }

    /// All items keyed by id, for joins done in memory by the analysis engines.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn all_items(&self) -> Result<Vec<Item>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {ITEM_COLUMNS} FROM reading_list ORDER BY literature_id"),
                (),
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row)?);
        }
        Ok(items)
    }

    /// Change an item's reading status and stamp `last_accessed`.
    ///
    /// # Errors
    ///
    /// `Core(NotFound)` when the item does not exist.
    pub async fn update_item_status(
        &self,
        id: &str,
        status: ItemStatus,
    ) -> Result<Item, DatabaseError> {
        let full_id = LiteratureId::parse(id)?.full_id();
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE reading_list SET status = ?1, last_accessed = ?2 WHERE literature_id = ?3",
                libsql::params![status.as_str(), format_datetime(&Utc::now()), full_id.as_str()],
            )
            .await?;
        if changed == 0 {
            return Err(CoreError::item_not_found(&full_id).into());
        }
        self.get_item(&full_id).await
    }

    /// Delete an item. Its links are removed by the foreign-key cascade.
    ///
    /// Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the id is malformed or the delete fails.
    pub async fn delete_item(&self, id: &str) -> Result<bool, DatabaseError> {
        let full_id = LiteratureId::parse(id)?.full_id();
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM reading_list WHERE literature_id = ?1",
                [full_id.as_str()],
            )
            .await?;
        tracing::debug!(id = %full_id, removed, "deleted item");
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_service, utc_date};
    use lit_core::enums::SourceType;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[tokio::test]
    async fn add_and_get_roundtrip() {
        let svc = memory_service().await.unwrap();
        let added = svc
            .add_item(
                NewItem::new("ArXiv:2106.15928")
                    .with_title("A survey")
                    .with_importance(4)
                    .with_added_date(utc_date(2021, 6, 30)),
            )
            .await
            .unwrap();

        assert_eq!(added.id, "arxiv:2106.15928");
        assert_eq!(added.source, SourceType::Arxiv);

        let fetched = svc.get_item("arxiv:2106.15928").await.unwrap();
        assert_eq!(fetched, added);
    }

    #[tokio::test]
    async fn bare_id_is_stored_as_custom() {
        let svc = memory_service().await.unwrap();
        let item = svc.add_item(NewItem::new("paper1")).await.unwrap();
        assert_eq!(item.id, "custom:paper1");
        assert_eq!(item.importance, 3);
        assert_eq!(item.status, ItemStatus::Unread);
        assert!(svc.item_exists("custom:paper1").await.unwrap());
        assert!(svc.get_item("paper1").await.is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[tokio::test]
    async fn importance_out_of_range_is_rejected(#[case] importance: i64) {
        let svc = memory_service().await.unwrap();
        let err = svc
            .add_item(NewItem::new("paper1").with_importance(importance))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn duplicate_add_is_invalid_state() {
        let svc = memory_service().await.unwrap();
        svc.add_item(NewItem::new("doi:10.1/x")).await.unwrap();
        let err = svc.add_item(NewItem::new("DOI:10.1/x")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidState(_)));
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let svc = memory_service().await.unwrap();
        assert!(svc.get_item("arxiv:none").await.unwrap_err().is_not_found());
        assert!(
            svc.update_item_status("arxiv:none", ItemStatus::Reading)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn list_filters_by_status_newest_first() {
        let svc = memory_service().await.unwrap();
        svc.add_item(NewItem::new("a").with_added_date(utc_date(2020, 1, 1)))
            .await
            .unwrap();
        svc.add_item(NewItem::new("b").with_added_date(utc_date(2022, 1, 1)))
            .await
            .unwrap();
        svc.update_item_status("a", ItemStatus::Completed)
            .await
            .unwrap();

        let all: Vec<_> = svc
            .list_items(None, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(all, vec!["custom:b", "custom:a"]);

        let done = svc
            .list_items(Some(ItemStatus::Completed), 10)
            .await
            .unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, "custom:a");

        assert_eq!(svc.list_items(None, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_item_reports_removal() {
        let svc = memory_service().await.unwrap();
        svc.add_item(NewItem::new("a")).await.unwrap();
        assert!(svc.delete_item("a").await.unwrap());
        assert!(!svc.delete_item("a").await.unwrap());
    }
}
