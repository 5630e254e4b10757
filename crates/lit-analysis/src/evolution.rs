//! Temporal evolution of one entity across the reading list.
//!
//! Each link to the entity becomes a timeline entry dated by its item's
//! `added_date`. Entries sort by (date, link `created_at`, item id), so links
//! made on the same day keep the order they were recorded in.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use lit_core::entities::{EntityLink, Item};
use lit_core::enums::RelationType;
use lit_core::errors::CoreError;
use lit_core::responses::{EvolutionResponse, EvolutionStats, TimelineDetails, TimelineEntry};
use lit_core::window::TimeWindow;
use lit_db::service::LitService;

use crate::count;
use crate::error::AnalysisError;

/// Collapse consecutive repeats: `[A, A, B, A]` becomes `[A, B, A]`.
#[must_use]
pub fn transitions(relations: impl IntoIterator<Item = RelationType>) -> Vec<RelationType> {
    let mut out: Vec<RelationType> = Vec::new();
    for relation in relations {
        if out.last() != Some(&relation) {
            out.push(relation);
        }
    }
    out
}

fn stats(timeline: &[TimelineEntry]) -> EvolutionStats {
    let mut distinct: Vec<RelationType> = Vec::new();
    for entry in timeline {
        if !distinct.contains(&entry.relation_type) {
            distinct.push(entry.relation_type);
        }
    }
    EvolutionStats {
        total_occurrences: count(timeline.len()),
        relation_type_count: count(distinct.len()),
        distinct_relation_types: distinct,
        first_occurrence: timeline.first().map(|e| e.date),
        last_occurrence: timeline.last().map(|e| e.date),
    }
}

/// Build the evolution of `entity_name` from loaded links and items.
///
/// Links whose item is absent from `items` are dropped.
#[must_use]
pub fn build_evolution(
    entity_name: &str,
    links: &[EntityLink],
    items: &HashMap<String, Item>,
    window: Option<(&str, &TimeWindow)>,
    include_details: bool,
    today: NaiveDate,
) -> EvolutionResponse {
    let bounds = window.map(|(_, w)| w.bounds(today));

    let mut rows: Vec<(&EntityLink, &Item, NaiveDate)> = links
        .iter()
        .filter(|l| l.entity_name == entity_name)
        .filter_map(|l| items.get(&l.item_id).map(|item| (l, item)))
        .map(|(l, item)| (l, item, item.added_date.date_naive()))
        .filter(|(_, _, date)| bounds.is_none_or(|b| b.contains(*date)))
        .collect();
    rows.sort_by(|a, b| {
        a.2.cmp(&b.2)
            .then_with(|| a.0.created_at.cmp(&b.0.created_at))
            .then_with(|| a.0.item_id.cmp(&b.0.item_id))
    });

    let timeline: Vec<TimelineEntry> = rows
        .into_iter()
        .map(|(link, item, date)| TimelineEntry {
            date,
            item_id: link.item_id.clone(),
            relation_type: link.relation_type,
            details: include_details.then(|| TimelineDetails {
                context: link.context.clone(),
                notes: link.notes.clone(),
                importance: item.importance,
                linked_at: link.created_at,
            }),
        })
        .collect();

    EvolutionResponse {
        entity_name: entity_name.to_string(),
        time_window: window.map(|(raw, _)| raw.to_string()),
        transitions: transitions(timeline.iter().map(|e| e.relation_type)),
        evolution_stats: stats(&timeline),
        timeline,
    }
}

/// Track how `entity_name` has been used over time.
///
/// `time_window` accepts `YYYY`, `YYYY-YYYY`, `YYYY-MM-DD..YYYY-MM-DD` (either
/// side optional) or `last-N{d,w,m,y}`; relative windows end today (UTC).
///
/// # Errors
///
/// `AnalysisError::Core` (validation) for a blank entity name or an
/// unparseable window, `AnalysisError::Database` if loading fails.
pub async fn track_evolution(
    service: &LitService,
    entity_name: &str,
    time_window: Option<&str>,
    include_details: bool,
) -> Result<EvolutionResponse, AnalysisError> {
    track_evolution_at(
        service,
        entity_name,
        time_window,
        include_details,
        Utc::now().date_naive(),
    )
    .await
}

/// [`track_evolution`] with an explicit "today" for relative windows.
///
/// # Errors
///
/// Same as [`track_evolution`].
pub async fn track_evolution_at(
    service: &LitService,
    entity_name: &str,
    time_window: Option<&str>,
    include_details: bool,
    today: NaiveDate,
) -> Result<EvolutionResponse, AnalysisError> {
    let entity_name = entity_name.trim();
    if entity_name.is_empty() {
        return Err(CoreError::Validation("entity name must not be blank".into()).into());
    }
    let window = time_window
        .map(|raw| TimeWindow::parse(raw).map(|w| (raw.trim(), w)))
        .transpose()?;

    let links = service.links_for_entity(entity_name).await?;
    let items: HashMap<String, Item> = service
        .all_items()
        .await?
        .into_iter()
        .map(|item| (item.id.clone(), item))
        .collect();

    let response = build_evolution(
        entity_name,
        &links,
        &items,
        window.as_ref().map(|(raw, w)| (*raw, w)),
        include_details,
        today,
    );
    tracing::debug!(
        entity = entity_name,
        occurrences = response.evolution_stats.total_occurrences,
        "tracked entity evolution"
    );
    Ok(response)
}
