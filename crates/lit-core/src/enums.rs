//! Closed vocabularies for litgraph.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Parsing from free text goes through `FromStr`, which reports unknown values
//! as `CoreError::Validation` listing the accepted set. The SQL CHECK
//! constraints mirror these lists.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Look up `raw` among `all` by string form, case-insensitively.
fn parse_variant<T: Copy>(
    raw: &str,
    field: &str,
    all: &[T],
    as_str: impl Fn(T) -> &'static str,
) -> Result<T, CoreError> {
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    all.iter()
        .copied()
        .find(|v| as_str(*v) == normalized)
        .ok_or_else(|| {
            let valid: Vec<&str> = all.iter().map(|v| as_str(*v)).collect();
            CoreError::Validation(format!(
                "invalid {field} '{raw}'. Valid values: {}",
                valid.join(", ")
            ))
        })
}

// ---------------------------------------------------------------------------
// RelationType
// ---------------------------------------------------------------------------

/// How a literature item relates to a named entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    Introduces,
    Discusses,
    Extends,
    Evaluates,
    Applies,
    Critiques,
}

impl RelationType {
    pub const ALL: &'static [Self] = &[
        Self::Introduces,
        Self::Discusses,
        Self::Extends,
        Self::Evaluates,
        Self::Applies,
        Self::Critiques,
    ];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Introduces => "introduces",
            Self::Discusses => "discusses",
            Self::Extends => "extends",
            Self::Evaluates => "evaluates",
            Self::Applies => "applies",
            Self::Critiques => "critiques",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, "relation_type", Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// MatchMode
// ---------------------------------------------------------------------------

/// How multiple search patterns combine when matching an item.
///
/// `exact` is the strictest: every item it returns is also returned by `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// At least one pattern satisfied by at least one link.
    #[default]
    Any,
    /// Every pattern satisfied by some link of the item.
    All,
    /// Pattern entity names equal the item's linked entity names.
    Exact,
}

impl MatchMode {
    pub const ALL: &'static [Self] = &[Self::Any, Self::All, Self::Exact];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::All => "all",
            Self::Exact => "exact",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, "match_mode", Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// ItemStatus
// ---------------------------------------------------------------------------

/// Reading status of a literature item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Unread,
    Reading,
    Completed,
    Archived,
}

impl ItemStatus {
    pub const ALL: &'static [Self] = &[Self::Unread, Self::Reading, Self::Completed, Self::Archived];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Reading => "reading",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, "status", Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// SourceType
// ---------------------------------------------------------------------------

/// Where a literature identifier comes from. Prefix of `source:local-id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Semanticscholar,
    Arxiv,
    Doi,
    #[default]
    Custom,
}

impl SourceType {
    pub const ALL: &'static [Self] = &[Self::Semanticscholar, Self::Arxiv, Self::Doi, Self::Custom];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Semanticscholar => "semanticscholar",
            Self::Arxiv => "arxiv",
            Self::Doi => "doi",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, "source", Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// LinkStatus
// ---------------------------------------------------------------------------

/// Whether a `link` call inserted a new row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Created,
    Updated,
}

impl LinkStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValidationStatus / SyncStatus
// ---------------------------------------------------------------------------

/// Outcome of cross-referencing links against the entity graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Every linked entity exists in the graph.
    Success,
    /// At least one linked entity is missing from the graph.
    Partial,
}

impl ValidationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which mode a graph sync ran in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Preview only; storage untouched.
    DryRun,
    /// Orphaned links were deleted.
    Removed,
    /// Orphans reported, nothing deleted.
    ReportOnly,
}

impl SyncStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DryRun => "dry_run",
            Self::Removed => "removed",
            Self::ReportOnly => "report_only",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TrailOp
// ---------------------------------------------------------------------------

/// Kind of link mutation recorded in the JSONL trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrailOp {
    Link,
    Relink,
    Unlink,
    SyncRemove,
}

impl TrailOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Relink => "relink",
            Self::Unlink => "unlink",
            Self::SyncRemove => "sync_remove",
        }
    }
}

impl fmt::Display for TrailOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("introduces", RelationType::Introduces)]
    #[case("critiques", RelationType::Critiques)]
    #[case("Applies", RelationType::Applies)]
    #[case(" evaluates ", RelationType::Evaluates)]
    fn relation_type_parses(#[case] raw: &str, #[case] expected: RelationType) {
        assert_eq!(raw.parse::<RelationType>().unwrap(), expected);
    }

    #[test]
    fn relation_type_rejects_unknown() {
        let err = "invalid_type".parse::<RelationType>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("introduces, discusses"));
    }

    #[test]
    fn relation_type_serde_is_snake_case() {
        let json = serde_json::to_string(&RelationType::Discusses).unwrap();
        assert_eq!(json, "\"discusses\"");
        let back: RelationType = serde_json::from_str("\"extends\"").unwrap();
        assert_eq!(back, RelationType::Extends);
    }

    #[test]
    fn every_relation_type_round_trips_through_as_str() {
        for rel in RelationType::ALL {
            assert_eq!(rel.as_str().parse::<RelationType>().unwrap(), *rel);
        }
    }

    #[rstest]
    #[case("any", MatchMode::Any)]
    #[case("ALL", MatchMode::All)]
    #[case("exact", MatchMode::Exact)]
    fn match_mode_parses(#[case] raw: &str, #[case] expected: MatchMode) {
        assert_eq!(raw.parse::<MatchMode>().unwrap(), expected);
    }

    #[test]
    fn match_mode_rejects_unknown() {
        assert!("fuzzy".parse::<MatchMode>().unwrap_err().is_validation());
    }

    #[test]
    fn item_status_default_is_unread() {
        assert_eq!(ItemStatus::default(), ItemStatus::Unread);
        assert!("done".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn sync_status_serializes_dry_run() {
        assert_eq!(
            serde_json::to_string(&SyncStatus::DryRun).unwrap(),
            "\"dry_run\""
        );
        assert_eq!(SyncStatus::ReportOnly.to_string(), "report_only");
    }
}
