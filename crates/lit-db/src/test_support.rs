//! Shared fixtures for lit-db tests and downstream crates' tests.

use chrono::{DateTime, TimeZone, Utc};
use lit_core::entities::NewItem;

use crate::LitDb;
use crate::error::DatabaseError;
use crate::service::LitService;
use crate::trail::writer::TrailWriter;

/// In-memory service with the trail disabled.
///
/// # Errors
///
/// Returns `DatabaseError` if the in-memory database cannot be opened.
pub async fn memory_service() -> Result<LitService, DatabaseError> {
    let db = LitDb::open_local(":memory:").await?;
    Ok(LitService::from_db(db, TrailWriter::disabled()))
}

/// In-memory service writing its trail to `trail_dir`.
///
/// # Errors
///
/// Returns `DatabaseError` if the database or trail directory cannot be created.
pub async fn memory_service_with_trail(
    trail_dir: std::path::PathBuf,
) -> Result<LitService, DatabaseError> {
    let db = LitDb::open_local(":memory:").await?;
    Ok(LitService::from_db(db, TrailWriter::new(trail_dir)?))
}

/// Midnight UTC on the given date.
///
/// # Panics
///
/// Panics on an invalid calendar date.
#[must_use]
pub fn utc_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid date {year}-{month}-{day}"))
}

/// Add an item with the given importance and added date.
///
/// # Errors
///
/// Returns `DatabaseError` if the insert fails.
pub async fn seed_item(
    svc: &LitService,
    id: &str,
    importance: i64,
    added: DateTime<Utc>,
) -> Result<(), DatabaseError> {
    svc.add_item(
        NewItem::new(id)
            .with_importance(importance)
            .with_added_date(added),
    )
    .await
    .map(|_| ())
}
