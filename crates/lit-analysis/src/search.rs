//! Pattern search across entity links.
//!
//! A pattern is satisfied by a link when every field the pattern sets equals
//! the link's field. Match modes:
//!
//! - `any`: at least one pattern is satisfied by some link of the item
//! - `all`: every pattern is satisfied by some link of the item
//! - `exact`: `all`, and the item links to no entity outside the patterns
//!
//! Results rank by satisfied pattern count, then by the summed
//! `match_distribution` weight of the matched entities, then by the earliest
//! contributing link, then by item id.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use lit_core::entities::EntityLink;
use lit_core::enums::MatchMode;
use lit_core::errors::CoreError;
use lit_core::query::SearchPattern;
use lit_core::responses::{SearchMatch, SearchResponse};
use lit_db::service::LitService;

use crate::count;
use crate::error::AnalysisError;

struct Candidate<'a> {
    item_id: &'a str,
    satisfied: Vec<&'a SearchPattern>,
    entities: BTreeSet<&'a str>,
    first_linked_at: DateTime<Utc>,
}

/// Normalize patterns the way link fields are stored, rejecting an empty list
/// or a blank entity.
fn normalize_patterns(patterns: &[SearchPattern]) -> Result<Vec<SearchPattern>, CoreError> {
    if patterns.is_empty() {
        return Err(CoreError::Validation(
            "at least one search pattern is required".into(),
        ));
    }
    let normalized: Vec<SearchPattern> = patterns.iter().map(SearchPattern::normalized).collect();
    if normalized.iter().any(|p| p.entity.is_empty()) {
        return Err(CoreError::Validation(
            "search pattern entity must not be blank".into(),
        ));
    }
    Ok(normalized)
}

fn evaluate<'a>(
    item_id: &'a str,
    links: &[&'a EntityLink],
    patterns: &'a [SearchPattern],
    mode: MatchMode,
) -> Option<Candidate<'a>> {
    let mut satisfied = Vec::new();
    let mut contributing: Vec<&'a EntityLink> = Vec::new();
    for pattern in patterns {
        let hits: Vec<&'a EntityLink> = links.iter().copied().filter(|l| pattern.matches(l)).collect();
        if !hits.is_empty() {
            satisfied.push(pattern);
            contributing.extend(hits);
        }
    }

    let matched = match mode {
        MatchMode::Any => !satisfied.is_empty(),
        MatchMode::All => satisfied.len() == patterns.len(),
        MatchMode::Exact => {
            let wanted: BTreeSet<&str> = patterns.iter().map(|p| p.entity.as_str()).collect();
            let linked: BTreeSet<&str> = links.iter().map(|l| l.entity_name.as_str()).collect();
            satisfied.len() == patterns.len() && wanted == linked
        }
    };
    if !matched {
        return None;
    }

    let first_linked_at = contributing.iter().map(|l| l.created_at).min()?;
    Some(Candidate {
        item_id,
        satisfied,
        entities: contributing.iter().map(|l| l.entity_name.as_str()).collect(),
        first_linked_at,
    })
}

/// Run a pattern search over an in-memory set of links.
///
/// # Errors
///
/// `CoreError::Validation` for an empty pattern list or a blank pattern entity.
pub fn search_links(
    links: &[EntityLink],
    patterns: &[SearchPattern],
    mode: MatchMode,
    limit: Option<usize>,
) -> Result<SearchResponse, CoreError> {
    let patterns = normalize_patterns(patterns)?;
    let patterns = patterns.as_slice();

    let mut by_item: BTreeMap<&str, Vec<&EntityLink>> = BTreeMap::new();
    for link in links {
        by_item.entry(link.item_id.as_str()).or_default().push(link);
    }

    let candidates: Vec<Candidate<'_>> = by_item
        .iter()
        .filter_map(|(&item_id, item_links)| evaluate(item_id, item_links, patterns, mode))
        .collect();

    let mut match_distribution: BTreeMap<String, u32> = BTreeMap::new();
    for candidate in &candidates {
        for entity in &candidate.entities {
            *match_distribution.entry((*entity).to_string()).or_default() += 1;
        }
    }

    let mut matches: Vec<SearchMatch> = candidates
        .into_iter()
        .map(|c| SearchMatch {
            item_id: c.item_id.to_string(),
            relevance: c
                .entities
                .iter()
                .filter_map(|e| match_distribution.get(*e))
                .sum(),
            matched_patterns: c.satisfied.into_iter().cloned().collect(),
            matched_entities: c.entities.into_iter().map(str::to_string).collect(),
            first_linked_at: c.first_linked_at,
        })
        .collect();

    matches.sort_by(|a, b| {
        b.matched_patterns
            .len()
            .cmp(&a.matched_patterns.len())
            .then_with(|| b.relevance.cmp(&a.relevance))
            .then_with(|| a.first_linked_at.cmp(&b.first_linked_at))
            .then_with(|| a.item_id.cmp(&b.item_id))
    });

    let total_matches = count(matches.len());
    if let Some(limit) = limit {
        matches.truncate(limit);
    }

    Ok(SearchResponse {
        match_mode: mode,
        total_matches,
        matches,
        match_distribution,
    })
}

/// Search the store's links for items matching `patterns` under `mode`.
///
/// `limit` truncates `matches`; `total_matches` always counts every match.
///
/// # Errors
///
/// `AnalysisError::Core` (validation) for an empty pattern list or blank
/// entity, `AnalysisError::Database` if loading links fails.
pub async fn search_by_patterns(
    service: &LitService,
    patterns: &[SearchPattern],
    mode: MatchMode,
    limit: Option<usize>,
) -> Result<SearchResponse, AnalysisError> {
    normalize_patterns(patterns)?;
    let links = service.all_links().await?;
    let response = search_links(&links, patterns, mode, limit)?;
    tracing::debug!(
        mode = %mode,
        patterns = patterns.len(),
        total = response.total_matches,
        "pattern search complete"
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lit_core::enums::RelationType;
    use pretty_assertions::assert_eq;

    fn link(item: &str, entity: &str, relation: RelationType, minute: u32) -> EntityLink {
        EntityLink {
            item_id: item.into(),
            entity_name: entity.into(),
            relation_type: relation,
            context: None,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, 0).unwrap(),
        }
    }

    fn ids(resp: &SearchResponse) -> Vec<&str> {
        resp.matches.iter().map(|m| m.item_id.as_str()).collect()
    }

    fn fixture() -> Vec<EntityLink> {
        vec![
            link("custom:a", "attention", RelationType::Introduces, 1),
            link("custom:a", "transformer", RelationType::Introduces, 2),
            link("custom:b", "attention", RelationType::Discusses, 3),
            link("custom:c", "attention", RelationType::Applies, 4),
            link("custom:c", "transformer", RelationType::Extends, 5),
            link("custom:c", "bert", RelationType::Extends, 6),
        ]
    }

    #[test]
    fn empty_patterns_are_rejected() {
        let err = search_links(&fixture(), &[], MatchMode::Any, None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn any_all_exact_narrow_progressively() {
        let links = fixture();
        let patterns = vec![
            SearchPattern::entity("attention"),
            SearchPattern::entity("transformer"),
        ];

        let any = search_links(&links, &patterns, MatchMode::Any, None).unwrap();
        assert_eq!(any.total_matches, 3);

        let all = search_links(&links, &patterns, MatchMode::All, None).unwrap();
        assert_eq!(ids(&all), vec!["custom:a", "custom:c"]);

        let exact = search_links(&links, &patterns, MatchMode::Exact, None).unwrap();
        assert_eq!(ids(&exact), vec!["custom:a"]);
    }

    #[test]
    fn relation_filter_applies() {
        let patterns = vec![SearchPattern::entity("attention").with_relation(RelationType::Discusses)];
        let resp = search_links(&fixture(), &patterns, MatchMode::Any, None).unwrap();
        assert_eq!(ids(&resp), vec!["custom:b"]);
        assert_eq!(resp.match_distribution.get("attention"), Some(&1));
    }

    #[test]
    fn ranking_prefers_more_patterns_then_weight() {
        let patterns = vec![
            SearchPattern::entity("attention"),
            SearchPattern::entity("bert"),
        ];
        let resp = search_links(&fixture(), &patterns, MatchMode::Any, None).unwrap();
        // c satisfies both patterns; a and b tie on one pattern and weight, so
        // the earlier link wins.
        assert_eq!(ids(&resp), vec!["custom:c", "custom:a", "custom:b"]);
        assert_eq!(resp.match_distribution.get("attention"), Some(&3));
        assert_eq!(resp.match_distribution.get("bert"), Some(&1));
        assert_eq!(resp.matches[0].relevance, 4);
        assert_eq!(resp.matches[0].matched_entities, vec!["attention", "bert"]);
    }

    #[test]
    fn limit_keeps_total() {
        let patterns = vec![SearchPattern::entity("attention")];
        let resp = search_links(&fixture(), &patterns, MatchMode::Any, Some(1)).unwrap();
        assert_eq!(resp.total_matches, 3);
        assert_eq!(resp.matches.len(), 1);
    }

    #[test]
    fn padded_entity_and_blank_context_still_match() {
        let patterns: Vec<SearchPattern> = serde_json::from_str(
            r#"[{"entity":" transformer "},{"entity":"attention","context":""}]"#,
        )
        .unwrap();
        let resp = search_links(&fixture(), &patterns, MatchMode::All, None).unwrap();
        assert_eq!(ids(&resp), vec!["custom:a", "custom:c"]);
        assert_eq!(resp.matches[0].matched_patterns[0].entity, "transformer");
    }

    #[test]
    fn whitespace_entity_is_rejected() {
        let err = search_links(&fixture(), &[SearchPattern::entity("   ")], MatchMode::Any, None)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn exact_mode_respects_pattern_fields() {
        let patterns = vec![
            SearchPattern::entity("attention").with_relation(RelationType::Discusses),
            SearchPattern::entity("transformer"),
        ];
        let resp = search_links(&fixture(), &patterns, MatchMode::Exact, None).unwrap();
        assert!(resp.matches.is_empty(), "custom:a introduces attention, it does not discuss it");
    }
}
