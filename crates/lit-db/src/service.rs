//! Service layer pairing the database with the link trail.
//!
//! `LitService` wraps `LitDb` (raw database access) and `TrailWriter` (JSONL
//! persistence). All repo methods are implemented as `impl LitService`.

use std::path::PathBuf;

use chrono::Utc;
use lit_core::entities::EntityLink;
use lit_core::enums::TrailOp;
use lit_core::trail::TrailOperation;

use crate::LitDb;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, to_trail_data};
use crate::trail::writer::TrailWriter;

/// Orchestrates database mutations and their trail records.
///
/// Mutations follow this protocol:
/// 1. Begin transaction
/// 2. Execute SQL
/// 3. Commit transaction
/// 4. Append JSONL trail operations
pub struct LitService {
    db: LitDb,
    trail: TrailWriter,
}

impl LitService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `trail_dir` - Directory for the JSONL link trail. `None` disables it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the trail
    /// directory cannot be created.
    pub async fn new_local(
        db_path: &str,
        trail_dir: Option<PathBuf>,
    ) -> Result<Self, DatabaseError> {
        let db = LitDb::open_local(db_path).await?;
        let trail = match trail_dir {
            Some(dir) => TrailWriter::new(dir)?,
            None => TrailWriter::disabled(),
        };
        Ok(Self { db, trail })
    }

    /// Create from an existing `LitDb`.
    #[must_use]
    pub const fn from_db(db: LitDb, trail: TrailWriter) -> Self {
        Self { db, trail }
    }

    #[must_use]
    pub const fn db(&self) -> &LitDb {
        &self.db
    }

    #[must_use]
    pub const fn trail(&self) -> &TrailWriter {
        &self.trail
    }

    /// Build a trail record carrying the full state of `link`.
    pub(crate) fn trail_op(op: TrailOp, link: &EntityLink) -> Result<TrailOperation, DatabaseError> {
        Ok(TrailOperation {
            v: 1,
            ts: format_datetime(&Utc::now()),
            op,
            item_id: link.item_id.clone(),
            entity_name: link.entity_name.clone(),
            data: to_trail_data(link)?,
        })
    }
}
