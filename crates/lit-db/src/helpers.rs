//! Row-to-entity parsing helpers.
//!
//! Timestamps are written as fixed-width RFC 3339 strings (microseconds, `Z`)
//! so lexical order in SQL equals chronological order. Reads also accept
//! `SQLite`'s `datetime('now')` format and bare dates for hand-edited rows.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Format a timestamp for storage.
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string matches none of the accepted formats.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all lit-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Serialize a value for the `data` field of a trail operation.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_trail_data<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DatabaseError> {
    serde_json::to_value(value).map_err(|e| DatabaseError::Other(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lit_core::enums::RelationType;
    use pretty_assertions::assert_eq;

    #[test]
    fn stored_timestamps_sort_lexically() {
        let a = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let b = a + chrono::Duration::microseconds(1);
        assert!(format_datetime(&a) < format_datetime(&b));
        assert_eq!(format_datetime(&a), "2024-01-01T09:00:00.000000Z");
    }

    #[test]
    fn parses_all_accepted_formats() {
        let expected = Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_datetime("2020-03-01T00:00:00Z").unwrap(), expected);
        assert_eq!(parse_datetime("2020-03-01 00:00:00").unwrap(), expected);
        assert_eq!(parse_datetime("2020-03-01").unwrap(), expected);
        assert!(parse_datetime("March 2020").is_err());
    }

    #[test]
    fn parse_enum_uses_snake_case() {
        let r: RelationType = parse_enum("critiques").unwrap();
        assert_eq!(r, RelationType::Critiques);
        assert!(parse_enum::<RelationType>("Critiques").is_err());
    }
}
