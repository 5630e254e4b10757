//! Entity link repository: one row per (item, entity) pair.
//!
//! Upserts keep the original `created_at`, so re-linking an item to the same
//! entity changes its relation type, context, and notes but not its position
//! on any timeline. Reads order by `created_at` and then insertion order.

use chrono::Utc;

use lit_core::entities::EntityLink;
use lit_core::enums::{LinkStatus, RelationType, TrailOp};
use lit_core::errors::CoreError;
use lit_core::ids::LiteratureId;
use lit_core::query::BulkLinkEntry;
use lit_core::responses::{BulkLinkResponse, LinkOutcome, UnlinkResponse};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, parse_datetime, parse_enum};
use crate::service::LitService;

const LINK_COLUMNS: &str =
    "literature_id, entity_name, relation_type, context, notes, created_at";

fn row_to_link(row: &libsql::Row) -> Result<EntityLink, DatabaseError> {
    Ok(EntityLink {
        item_id: row.get::<String>(0)?,
        entity_name: row.get::<String>(1)?,
        relation_type: parse_enum(&row.get::<String>(2)?)?,
        context: get_opt_string(row, 3)?,
        notes: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

async fn collect_links(mut rows: libsql::Rows) -> Result<Vec<EntityLink>, DatabaseError> {
    let mut links = Vec::new();
    while let Some(row) = rows.next().await? {
        links.push(row_to_link(&row)?);
    }
    Ok(links)
}

/// Trimmed entity name, or `Validation` when blank.
fn normalize_entity_name(name: &str) -> Result<&str, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(CoreError::Validation("entity name must not be blank".into()))
    } else {
        Ok(trimmed)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Insert or overwrite one link on `conn` (a plain connection or an open transaction).
async fn upsert_link(
    conn: &libsql::Connection,
    item_id: &str,
    entity_name: &str,
    relation_type: RelationType,
    context: Option<&str>,
    notes: Option<&str>,
) -> Result<LinkOutcome, DatabaseError> {
    let entity_name = normalize_entity_name(entity_name)?;
    let context = non_empty(context);
    let notes = non_empty(notes);

    let mut rows = conn
        .query(
            "SELECT created_at FROM literature_entity_links
             WHERE literature_id = ?1 AND entity_name = ?2",
            libsql::params![item_id, entity_name],
        )
        .await?;
    let existing = match rows.next().await? {
        Some(row) => Some(parse_datetime(&row.get::<String>(0)?)?),
        None => None,
    };

    let (created_at, status) = if let Some(created_at) = existing {
        conn.execute(
            "UPDATE literature_entity_links SET relation_type = ?1, context = ?2, notes = ?3
             WHERE literature_id = ?4 AND entity_name = ?5",
            libsql::params![
                relation_type.as_str(),
                context.as_deref(),
                notes.as_deref(),
                item_id,
                entity_name
            ],
        )
        .await?;
        (created_at, LinkStatus::Updated)
    } else {
        let now = Utc::now();
        conn.execute(
            "INSERT INTO literature_entity_links (literature_id, entity_name, relation_type, context, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            libsql::params![
                item_id,
                entity_name,
                relation_type.as_str(),
                context.as_deref(),
                notes.as_deref(),
                format_datetime(&now)
            ],
        )
        .await?;
        (now, LinkStatus::Created)
    };

    Ok(LinkOutcome {
        link: EntityLink {
            item_id: item_id.to_string(),
            entity_name: entity_name.to_string(),
            relation_type,
            context,
            notes,
            created_at,
        },
        status,
    })
}

const fn trail_op_for(status: LinkStatus) -> TrailOp {
    match status {
        LinkStatus::Created => TrailOp::Link,
        LinkStatus::Updated => TrailOp::Relink,
    }
}

impl LitService {
    /// Normalize an item id and confirm the item exists.
    async fn require_item(&self, item_id: &str) -> Result<String, DatabaseError> {
        let full_id = LiteratureId::parse(item_id)?.full_id();
        if !self.item_exists(&full_id).await? {
            return Err(CoreError::item_not_found(&full_id).into());
        }
        Ok(full_id)
    }

    /// Create or overwrite the link between an item and an entity.
    ///
    /// # Errors
    ///
    /// `Core(NotFound)` when the item does not exist, `Core(Validation)` for a
    /// blank entity name. Storage errors propagate unchanged.
    pub async fn link(
        &self,
        item_id: &str,
        entity_name: &str,
        relation_type: RelationType,
        context: Option<&str>,
        notes: Option<&str>,
    ) -> Result<LinkOutcome, DatabaseError> {
        let item_id = self.require_item(item_id).await?;

        let tx = self.db().conn().transaction().await?;
        let outcome =
            match upsert_link(&tx, &item_id, entity_name, relation_type, context, notes).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tx.rollback().await?;
                    return Err(e);
                }
            };
        tx.commit().await?;

        tracing::debug!(
            item_id = %item_id,
            entity = %outcome.link.entity_name,
            relation = %relation_type,
            status = %outcome.status,
            "linked entity"
        );

        self.trail()
            .append(&Self::trail_op(trail_op_for(outcome.status), &outcome.link)?)?;
        Ok(outcome)
    }

    /// Link many entities to one item atomically.
    ///
    /// Entries are applied in order; a later entry for the same entity
    /// overwrites an earlier one. Any failure rolls back the whole batch.
    ///
    /// # Errors
    ///
    /// `Core(NotFound)` when the item does not exist, `Core(Validation)` for
    /// a blank entity name in any entry.
    pub async fn bulk_link(
        &self,
        item_id: &str,
        entries: &[BulkLinkEntry],
    ) -> Result<BulkLinkResponse, DatabaseError> {
        let item_id = self.require_item(item_id).await?;

        let tx = self.db().conn().transaction().await?;
        let result: Result<Vec<LinkOutcome>, DatabaseError> = async {
            let mut outcomes = Vec::with_capacity(entries.len());
            for entry in entries {
                outcomes.push(
                    upsert_link(
                        &tx,
                        &item_id,
                        &entry.name,
                        entry.relation_type,
                        entry.context.as_deref(),
                        entry.notes.as_deref(),
                    )
                    .await?,
                );
            }
            Ok(outcomes)
        }
        .await;

        let outcomes = match result {
            Ok(outcomes) => {
                tx.commit().await?;
                outcomes
            }
            Err(e) => {
                tx.rollback().await?;
                tracing::debug!(item_id = %item_id, error = %e, "bulk link rolled back");
                return Err(e);
            }
        };

        let ops = outcomes
            .iter()
            .map(|o| Self::trail_op(trail_op_for(o.status), &o.link))
            .collect::<Result<Vec<_>, _>>()?;
        self.trail().append_all(&ops)?;

        let linked = u32::try_from(outcomes.len())
            .map_err(|e| DatabaseError::InvalidState(format!("too many links: {e}")))?;
        tracing::debug!(item_id = %item_id, linked, "bulk linked entities");

        Ok(BulkLinkResponse {
            item_id,
            linked,
            relation_types: outcomes.iter().map(|o| o.link.relation_type).collect(),
        })
    }

    /// Remove the link between an item and an entity. Idempotent: removing a
    /// missing link succeeds with `removed == false` and leaves the trail alone.
    ///
    /// # Errors
    ///
    /// `Core(Validation)` for a malformed item id. Storage errors propagate.
    pub async fn unlink(
        &self,
        item_id: &str,
        entity_name: &str,
    ) -> Result<UnlinkResponse, DatabaseError> {
        let item_id = LiteratureId::parse(item_id)?.full_id();
        let entity_name = entity_name.trim();

        let tx = self.db().conn().transaction().await?;
        let result: Result<Option<EntityLink>, DatabaseError> = async {
            let existing = {
                let mut rows = tx
                    .query(
                        &format!(
                            "SELECT {LINK_COLUMNS} FROM literature_entity_links
                             WHERE literature_id = ?1 AND entity_name = ?2"
                        ),
                        libsql::params![item_id.as_str(), entity_name],
                    )
                    .await?;
                match rows.next().await? {
                    Some(row) => Some(row_to_link(&row)?),
                    None => None,
                }
            };
            if existing.is_some() {
                tx.execute(
                    "DELETE FROM literature_entity_links WHERE literature_id = ?1 AND entity_name = ?2",
                    libsql::params![item_id.as_str(), entity_name],
                )
                .await?;
            }
            Ok(existing)
        }
        .await;

        let removed_link = match result {
            Ok(existing) => {
                tx.commit().await?;
                existing
            }
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        };

        if let Some(link) = &removed_link {
            tracing::debug!(item_id = %item_id, entity = %entity_name, "unlinked entity");
            self.trail().append(&Self::trail_op(TrailOp::Unlink, link)?)?;
        }

        Ok(UnlinkResponse {
            item_id,
            entity_name: entity_name.to_string(),
            removed: removed_link.is_some(),
        })
    }

    /// Links of one item, oldest first.
    ///
    /// # Errors
    ///
    /// `Core(Validation)` for a malformed item id.
    pub async fn links_for_item(&self, item_id: &str) -> Result<Vec<EntityLink>, DatabaseError> {
        let item_id = LiteratureId::parse(item_id)?.full_id();
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {LINK_COLUMNS} FROM literature_entity_links
                     WHERE literature_id = ?1 ORDER BY created_at, rowid"
                ),
                [item_id.as_str()],
            )
            .await?;
        collect_links(rows).await
    }

    /// Links to one entity, oldest first. Entity names match case-sensitively.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn links_for_entity(
        &self,
        entity_name: &str,
    ) -> Result<Vec<EntityLink>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {LINK_COLUMNS} FROM literature_entity_links
                     WHERE entity_name = ?1 ORDER BY created_at, rowid"
                ),
                [entity_name.trim()],
            )
            .await?;
        collect_links(rows).await
    }

    /// Every link in the store, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn all_links(&self) -> Result<Vec<EntityLink>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {LINK_COLUMNS} FROM literature_entity_links ORDER BY created_at, rowid"
                ),
                (),
            )
            .await?;
        collect_links(rows).await
    }

    /// Distinct linked entity names, sorted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn distinct_entity_names(&self) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT DISTINCT entity_name FROM literature_entity_links ORDER BY entity_name",
                (),
            )
            .await?;
        let mut names = Vec::new();
        while let Some(row) = rows.next().await? {
            names.push(row.get::<String>(0)?);
        }
        Ok(names)
    }

    /// Total number of link rows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn link_count(&self) -> Result<u32, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM literature_entity_links", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u32::try_from(count)
            .map_err(|e| DatabaseError::InvalidState(format!("link count {count}: {e}")))
    }

    /// Delete every link to any of `names` in one transaction.
    ///
    /// Returns the removed links, oldest first. Each removal is recorded in
    /// the trail as `sync_remove`.
    ///
    /// # Errors
    ///
    /// Storage errors propagate; the transaction is rolled back and nothing
    /// is removed.
    pub async fn delete_links_for_entities(
        &self,
        names: &[String],
    ) -> Result<Vec<EntityLink>, DatabaseError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let tx = self.db().conn().transaction().await?;
        let result: Result<Vec<EntityLink>, DatabaseError> = async {
            let mut removed = Vec::new();
            for name in names {
                let rows = tx
                    .query(
                        &format!(
                            "SELECT {LINK_COLUMNS} FROM literature_entity_links
                             WHERE entity_name = ?1 ORDER BY created_at, rowid"
                        ),
                        [name.as_str()],
                    )
                    .await?;
                removed.extend(collect_links(rows).await?);
                tx.execute(
                    "DELETE FROM literature_entity_links WHERE entity_name = ?1",
                    [name.as_str()],
                )
                .await?;
            }
            Ok(removed)
        }
        .await;

        let mut removed = match result {
            Ok(removed) => {
                tx.commit().await?;
                removed
            }
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        };
        removed.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let ops = removed
            .iter()
            .map(|l| Self::trail_op(TrailOp::SyncRemove, l))
            .collect::<Result<Vec<_>, _>>()?;
        self.trail().append_all(&ops)?;

        tracing::info!(
            entities = names.len(),
            links = removed.len(),
            "removed links to entities"
        );
        Ok(removed)
    }
}
