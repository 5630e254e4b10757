use anyhow::bail;
use lit_core::entities::{EntityLink, GraphEntity, Item, NewItem};
use lit_core::query::{BulkLinkEntry, SearchPattern};
use lit_core::responses::{
    BulkLinkResponse, EvolutionResponse, GapReport, GraphLoadSummary, LinkOutcome,
    SearchResponse, SyncReport, UnlinkResponse, ValidationReport,
};
use lit_core::trail::TrailOperation;
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Type names accepted by `lit schema`.
pub const SCHEMA_TYPES: &[&str] = &[
    "item",
    "new-item",
    "link",
    "bulk-link-entry",
    "search-pattern",
    "graph-entity",
    "link-outcome",
    "bulk-link-response",
    "unlink-response",
    "search-response",
    "evolution-response",
    "gap-report",
    "graph-load-summary",
    "validation-report",
    "sync-report",
    "trail-operation",
];

/// Handle `lit schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_by_name(&args.type_name)?;
    output(&schema, flags.format)
}

fn schema_by_name(name: &str) -> anyhow::Result<Schema> {
    let schema = match name.trim().replace('_', "-").as_str() {
        "item" => schema_for!(Item),
        "new-item" => schema_for!(NewItem),
        "link" => schema_for!(EntityLink),
        "bulk-link-entry" => schema_for!(BulkLinkEntry),
        "search-pattern" => schema_for!(SearchPattern),
        "graph-entity" => schema_for!(GraphEntity),
        "link-outcome" => schema_for!(LinkOutcome),
        "bulk-link-response" => schema_for!(BulkLinkResponse),
        "unlink-response" => schema_for!(UnlinkResponse),
        "search-response" => schema_for!(SearchResponse),
        "evolution-response" => schema_for!(EvolutionResponse),
        "gap-report" => schema_for!(GapReport),
        "graph-load-summary" => schema_for!(GraphLoadSummary),
        "validation-report" => schema_for!(ValidationReport),
        "sync-report" => schema_for!(SyncReport),
        "trail-operation" => schema_for!(TrailOperation),
        other => bail!(
            "unknown schema type '{other}'. Available: {}",
            SCHEMA_TYPES.join(", ")
        ),
    };
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::{SCHEMA_TYPES, schema_by_name};

    #[test]
    fn every_listed_type_resolves() {
        for name in SCHEMA_TYPES {
            let schema = schema_by_name(name).expect("listed schema should resolve");
            let value = serde_json::to_value(&schema).expect("schema should serialize");
            assert!(value.get("title").is_some(), "{name} schema has no title");
        }
    }

    #[test]
    fn accepts_snake_case_names() {
        assert!(schema_by_name("gap_report").is_ok());
    }

    #[test]
    fn unknown_type_lists_alternatives() {
        let err = schema_by_name("paper").expect_err("unknown type");
        assert!(err.to_string().contains("search-response"));
    }
}
