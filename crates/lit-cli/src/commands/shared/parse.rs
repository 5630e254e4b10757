use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse `YYYY-MM-DD` as midnight UTC.
pub fn parse_date(raw: &str, field: &str) -> anyhow::Result<DateTime<Utc>> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow::anyhow!("invalid {field} '{raw}': expected YYYY-MM-DD"))
}
