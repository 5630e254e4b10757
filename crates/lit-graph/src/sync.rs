//! Reconcile stored entity links against the entity graph.
//!
//! An orphan link references an entity name absent from the graph. Validation
//! only reports; [`sync`] can also remove orphans, always previewable with
//! `dry_run`.

use std::path::Path;

use lit_core::enums::{SyncStatus, ValidationStatus};
use lit_core::responses::{SyncReport, ValidationReport};
use lit_db::service::LitService;

use crate::error::GraphError;
use crate::reader::EntityGraph;

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Compare the linked entity names against an already-loaded graph.
#[must_use]
pub fn validation_report(
    graph: &EntityGraph,
    linked_names: &[String],
    total_links: u32,
) -> ValidationReport {
    let missing_entities = graph.missing(linked_names.iter().map(String::as_str));
    let status = if missing_entities.is_empty() {
        ValidationStatus::Success
    } else {
        ValidationStatus::Partial
    };
    ValidationReport {
        status,
        entity_count: count(linked_names.len()),
        total_linked_entities: total_links,
        graph_entity_count: count(graph.len()),
        skipped_records: graph.skipped_records(),
        missing_entities,
    }
}

/// Load the graph at `graph_path` and report which linked entities it lacks.
///
/// Status is `success` exactly when no linked entity is missing.
///
/// # Errors
///
/// `GraphError::Io` if the graph file cannot be read, `GraphError::Database`
/// if the link store query fails.
pub async fn validate_links(
    service: &LitService,
    graph_path: &Path,
) -> Result<ValidationReport, GraphError> {
    let graph = EntityGraph::load(graph_path)?;
    let linked = service.distinct_entity_names().await?;
    let total = service.link_count().await?;
    let report = validation_report(&graph, &linked, total);
    tracing::debug!(
        status = %report.status,
        missing = report.missing_entities.len(),
        "validated entity links"
    );
    Ok(report)
}

/// Find orphan links and, with `auto_remove` and without `dry_run`, delete them.
///
/// - `dry_run`: nothing is written; `affected_links` lists what removal would delete.
/// - `auto_remove`: orphans are deleted in one transaction; `removed_count` is set.
/// - neither: report only.
///
/// # Errors
///
/// `GraphError::Io` if the graph file cannot be read, `GraphError::Database`
/// if a query or the removal transaction fails (nothing is removed then).
pub async fn sync(
    service: &LitService,
    graph_path: &Path,
    auto_remove: bool,
    dry_run: bool,
) -> Result<SyncReport, GraphError> {
    let graph = EntityGraph::load(graph_path)?;
    let linked = service.distinct_entity_names().await?;
    let orphaned_entities = graph.missing(linked.iter().map(String::as_str));

    if orphaned_entities.is_empty() {
        return Ok(SyncReport {
            status: if dry_run {
                SyncStatus::DryRun
            } else if auto_remove {
                SyncStatus::Removed
            } else {
                SyncStatus::ReportOnly
            },
            orphaned_entities,
            affected_links: Vec::new(),
            removed_count: 0,
        });
    }

    if auto_remove && !dry_run {
        for name in &orphaned_entities {
            tracing::warn!(entity = %name, "removing links to entity missing from graph");
        }
        let removed = service
            .delete_links_for_entities(&orphaned_entities)
            .await?;
        return Ok(SyncReport {
            status: SyncStatus::Removed,
            orphaned_entities,
            removed_count: count(removed.len()),
            affected_links: removed,
        });
    }

    let mut affected_links = Vec::new();
    for name in &orphaned_entities {
        affected_links.extend(service.links_for_entity(name).await?);
    }
    affected_links.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    Ok(SyncReport {
        status: if dry_run {
            SyncStatus::DryRun
        } else {
            SyncStatus::ReportOnly
        },
        orphaned_entities,
        affected_links,
        removed_count: 0,
    })
}
