//! Research-gap detection.
//!
//! Only items with `importance >= min_importance` count. An entity linked
//! from exactly one qualifying item is isolated; one linked from fewer than
//! `min_papers` is weakly connected. A section (link context) is a gap when
//! its distinct qualifying item count falls below the mean over all observed
//! sections.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use lit_core::entities::EntityLink;
use lit_core::errors::CoreError;
use lit_core::responses::{EntityCoverage, GapReport, ResearchSuggestion, SectionGap};
use lit_db::service::LitService;

use crate::count;
use crate::error::AnalysisError;

/// Default number of related entities listed per suggestion.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Parameters for [`find_gaps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapQuery {
    pub min_importance: i64,
    pub min_papers: u32,
    pub include_suggestions: bool,
    pub suggestion_limit: usize,
}

impl Default for GapQuery {
    fn default() -> Self {
        Self {
            min_importance: 3,
            min_papers: 2,
            include_suggestions: false,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl GapQuery {
    fn validate(&self) -> Result<(), CoreError> {
        if !(1..=5).contains(&self.min_importance) {
            return Err(CoreError::Validation(format!(
                "min_importance must be between 1 and 5, got {}",
                self.min_importance
            )));
        }
        if self.min_papers < 1 {
            return Err(CoreError::Validation("min_papers must be at least 1".into()));
        }
        Ok(())
    }
}

fn section_gaps(links: &[&EntityLink]) -> Vec<SectionGap> {
    let mut by_context: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for link in links {
        if let Some(context) = link.context.as_deref() {
            by_context
                .entry(context)
                .or_default()
                .insert(link.item_id.as_str());
        }
    }
    if by_context.is_empty() {
        return Vec::new();
    }

    let total: usize = by_context.values().map(BTreeSet::len).sum();
    #[allow(clippy::cast_precision_loss)]
    let threshold = total as f64 / by_context.len() as f64;

    let mut gaps: Vec<SectionGap> = by_context
        .into_iter()
        .filter(|(_, items)| {
            #[allow(clippy::cast_precision_loss)]
            let n = items.len() as f64;
            n < threshold
        })
        .map(|(context, items)| SectionGap {
            context: context.to_string(),
            item_count: count(items.len()),
            threshold,
        })
        .collect();
    gaps.sort_by(|a, b| a.item_count.cmp(&b.item_count).then_with(|| a.context.cmp(&b.context)));
    gaps
}

fn suggestion_for(
    entity: &str,
    entity_items: &BTreeMap<&str, BTreeSet<&str>>,
    item_entities: &HashMap<&str, BTreeSet<&str>>,
    limit: usize,
) -> ResearchSuggestion {
    let items = entity_items.get(entity).cloned().unwrap_or_default();

    let mut co_occurrence: BTreeMap<&str, u32> = BTreeMap::new();
    for item in &items {
        for other in item_entities.get(item).into_iter().flatten() {
            if *other != entity {
                *co_occurrence.entry(*other).or_default() += 1;
            }
        }
    }
    let mut ranked: Vec<(&str, u32)> = co_occurrence.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let related_entities: Vec<String> = ranked
        .into_iter()
        .take(limit)
        .map(|(name, _)| name.to_string())
        .collect();

    let rationale = if related_entities.is_empty() {
        format!(
            "'{entity}' appears in {} qualifying item(s) with no co-occurring entities; look for work connecting it to other concepts",
            items.len()
        )
    } else {
        format!(
            "'{entity}' appears in {} qualifying item(s); explore its relation to {}",
            items.len(),
            related_entities.join(", ")
        )
    };

    ResearchSuggestion {
        entity_name: entity.to_string(),
        related_entities,
        rationale,
    }
}

/// Compute the gap report from loaded links and item importances.
///
/// # Errors
///
/// `CoreError::Validation` for `min_importance` outside 1..=5 or `min_papers` of 0.
pub fn analyze_gaps(
    links: &[EntityLink],
    importance: &HashMap<String, i64>,
    query: &GapQuery,
) -> Result<GapReport, CoreError> {
    query.validate()?;

    let qualifying: Vec<&EntityLink> = links
        .iter()
        .filter(|l| {
            importance
                .get(&l.item_id)
                .is_some_and(|i| *i >= query.min_importance)
        })
        .collect();

    let mut entity_items: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut item_entities: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for link in &qualifying {
        entity_items
            .entry(link.entity_name.as_str())
            .or_default()
            .insert(link.item_id.as_str());
        item_entities
            .entry(link.item_id.as_str())
            .or_default()
            .insert(link.entity_name.as_str());
    }

    let coverage = |name: &str, items: &BTreeSet<&str>| EntityCoverage {
        entity_name: name.to_string(),
        item_count: count(items.len()),
        item_ids: items.iter().map(|s| (*s).to_string()).collect(),
    };

    let isolated_entities: Vec<EntityCoverage> = entity_items
        .iter()
        .filter(|(_, items)| items.len() == 1)
        .map(|(&name, items)| coverage(name, items))
        .collect();
    let weak_connections: Vec<EntityCoverage> = entity_items
        .iter()
        .filter(|(_, items)| count(items.len()) < query.min_papers)
        .map(|(&name, items)| coverage(name, items))
        .collect();

    let research_suggestions = query.include_suggestions.then(|| {
        let flagged: BTreeSet<&str> = isolated_entities
            .iter()
            .chain(&weak_connections)
            .map(|c| c.entity_name.as_str())
            .collect();
        flagged
            .into_iter()
            .map(|e| suggestion_for(e, &entity_items, &item_entities, query.suggestion_limit))
            .collect()
    });

    Ok(GapReport {
        min_importance: query.min_importance,
        min_papers: query.min_papers,
        section_gaps: section_gaps(&qualifying),
        isolated_entities,
        weak_connections,
        research_suggestions,
    })
}

/// Find under-covered entities and sections among qualifying items.
///
/// Never fails on an empty store.
///
/// # Errors
///
/// `AnalysisError::Core` (validation) for out-of-range parameters,
/// `AnalysisError::Database` if loading fails.
pub async fn find_gaps(service: &LitService, query: &GapQuery) -> Result<GapReport, AnalysisError> {
    query.validate()?;
    let links = service.all_links().await?;
    let importance: HashMap<String, i64> = service
        .all_items()
        .await?
        .into_iter()
        .map(|item| (item.id, item.importance))
        .collect();
    let report = analyze_gaps(&links, &importance, query)?;
    tracing::debug!(
        isolated = report.isolated_entities.len(),
        weak = report.weak_connections.len(),
        sections = report.section_gaps.len(),
        "gap analysis complete"
    );
    Ok(report)
}
