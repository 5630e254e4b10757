//! Response types returned by the linking and analysis operations.
//!
//! These structs define the JSON shape of `lit link`, `lit search`,
//! `lit evolution`, `lit gaps`, and `lit graph validate|sync` output.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::EntityLink;
use crate::enums::{LinkStatus, MatchMode, RelationType, SyncStatus, ValidationStatus};
use crate::query::SearchPattern;

// ---------------------------------------------------------------------------
// Linking
// ---------------------------------------------------------------------------

/// Response from a single `link` call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkOutcome {
    pub link: EntityLink,
    pub status: LinkStatus,
}

/// Response from `bulk_link`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BulkLinkResponse {
    pub item_id: String,
    pub linked: u32,
    pub relation_types: Vec<RelationType>,
}

/// Response from `unlink`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UnlinkResponse {
    pub item_id: String,
    pub entity_name: String,
    pub removed: bool,
}

// ---------------------------------------------------------------------------
// Pattern search
// ---------------------------------------------------------------------------

/// One item that matched a pattern search.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchMatch {
    pub item_id: String,
    /// Patterns from the request satisfied by at least one link of the item.
    pub matched_patterns: Vec<SearchPattern>,
    /// Entity names through which the item matched, sorted.
    pub matched_entities: Vec<String>,
    /// Sum of `match_distribution` counts over `matched_entities`.
    pub relevance: u32,
    /// Earliest `created_at` among the contributing links.
    pub first_linked_at: DateTime<Utc>,
}

/// Response from a pattern search.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchResponse {
    pub match_mode: MatchMode,
    pub total_matches: u32,
    pub matches: Vec<SearchMatch>,
    /// Entity name → number of matching items that matched via that entity.
    pub match_distribution: BTreeMap<String, u32>,
}

// ---------------------------------------------------------------------------
// Evolution
// ---------------------------------------------------------------------------

/// One occurrence of an entity on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimelineEntry {
    pub date: NaiveDate,
    pub item_id: String,
    pub relation_type: RelationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<TimelineDetails>,
}

/// Extra per-occurrence fields included when details are requested.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimelineDetails {
    pub context: Option<String>,
    pub notes: Option<String>,
    pub importance: i64,
    pub linked_at: DateTime<Utc>,
}

/// Summary counters over an entity's timeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvolutionStats {
    pub total_occurrences: u32,
    /// Relation types in order of first appearance.
    pub distinct_relation_types: Vec<RelationType>,
    pub relation_type_count: u32,
    pub first_occurrence: Option<NaiveDate>,
    pub last_occurrence: Option<NaiveDate>,
}

/// Response from `track_evolution`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvolutionResponse {
    pub entity_name: String,
    pub time_window: Option<String>,
    pub timeline: Vec<TimelineEntry>,
    /// Relation types with consecutive repeats collapsed.
    pub transitions: Vec<RelationType>,
    pub evolution_stats: EvolutionStats,
}

// ---------------------------------------------------------------------------
// Gap analysis
// ---------------------------------------------------------------------------

/// An entity with too few qualifying items.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntityCoverage {
    pub entity_name: String,
    pub item_count: u32,
    pub item_ids: Vec<String>,
}

/// A section (link context) with sparse coverage.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SectionGap {
    pub context: String,
    pub item_count: u32,
    pub threshold: f64,
}

/// A candidate bridging direction for an under-connected entity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchSuggestion {
    pub entity_name: String,
    pub related_entities: Vec<String>,
    pub rationale: String,
}

/// Response from `find_gaps`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GapReport {
    pub min_importance: i64,
    pub min_papers: u32,
    pub isolated_entities: Vec<EntityCoverage>,
    pub weak_connections: Vec<EntityCoverage>,
    pub section_gaps: Vec<SectionGap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_suggestions: Option<Vec<ResearchSuggestion>>,
}

// ---------------------------------------------------------------------------
// Graph reconciliation
// ---------------------------------------------------------------------------

/// Response from loading the entity graph.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GraphLoadSummary {
    pub path: String,
    pub entity_count: u32,
    pub skipped_records: u32,
    pub ignored_records: u32,
    /// Entity type → number of entities of that type. Untyped entities count under `""`.
    pub entity_types: BTreeMap<String, u32>,
}

/// Response from `validate_links`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    /// Distinct entity names referenced by links.
    pub entity_count: u32,
    /// Total link rows.
    pub total_linked_entities: u32,
    pub graph_entity_count: u32,
    pub skipped_records: u32,
    pub missing_entities: Vec<String>,
}

/// Response from `sync`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SyncReport {
    pub status: SyncStatus,
    pub orphaned_entities: Vec<String>,
    /// Links that would be removed (dry run / report only) or were removed.
    pub affected_links: Vec<EntityLink>,
    pub removed_count: u32,
}
