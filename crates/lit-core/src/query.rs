//! Transient request objects: search patterns and bulk-link entries.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::EntityLink;
use crate::enums::RelationType;
use crate::errors::CoreError;

/// A single link predicate for pattern search.
///
/// A link satisfies the pattern when every field that is set here equals the
/// corresponding link field. Entity names compare case-sensitively.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct SearchPattern {
    pub entity: String,
    #[serde(default)]
    pub relation_type: Option<RelationType>,
    #[serde(default)]
    pub context: Option<String>,
}

impl SearchPattern {
    #[must_use]
    pub fn entity(name: impl Into<String>) -> Self {
        Self {
            entity: name.into(),
            relation_type: None,
            context: None,
        }
    }

    #[must_use]
    pub const fn with_relation(mut self, relation: RelationType) -> Self {
        self.relation_type = Some(relation);
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Copy with the entity trimmed and a blank context dropped, matching how
    /// links are stored.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            entity: self.entity.trim().to_string(),
            relation_type: self.relation_type,
            context: self
                .context
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }

    /// Whether `link` satisfies every non-null field of this pattern.
    #[must_use]
    pub fn matches(&self, link: &EntityLink) -> bool {
        self.entity == link.entity_name
            && self.relation_type.is_none_or(|r| r == link.relation_type)
            && self
                .context
                .as_deref()
                .is_none_or(|c| link.context.as_deref() == Some(c))
    }
}

/// Compact CLI form: `entity[:relation_type[:context]]`. Empty segments are
/// treated as unset, so `attention::methods` constrains only the context.
impl FromStr for SearchPattern {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let entity = parts.next().unwrap_or_default().trim();
        if entity.is_empty() {
            return Err(CoreError::Validation(format!(
                "search pattern '{s}' has no entity"
            )));
        }
        let relation_type = match parts.next().map(str::trim) {
            Some(r) if !r.is_empty() => Some(r.parse::<RelationType>()?),
            _ => None,
        };
        let context = parts
            .next()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Ok(Self {
            entity: entity.to_string(),
            relation_type,
            context,
        })
    }
}

/// One entry of a bulk-link batch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BulkLinkEntry {
    pub name: String,
    pub relation_type: RelationType,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BulkLinkEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, relation_type: RelationType) -> Self {
        Self {
            name: name.into(),
            relation_type,
            context: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn link(entity: &str, relation: RelationType, context: Option<&str>) -> EntityLink {
        EntityLink {
            item_id: "arxiv:1".into(),
            entity_name: entity.into(),
            relation_type: relation,
            context: context.map(str::to_string),
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn entity_only_pattern_ignores_other_fields() {
        let p = SearchPattern::entity("transformer");
        assert!(p.matches(&link("transformer", RelationType::Extends, None)));
        assert!(!p.matches(&link("Transformer", RelationType::Extends, None)));
    }

    #[test]
    fn relation_and_context_must_both_match() {
        let p = SearchPattern::entity("attention")
            .with_relation(RelationType::Introduces)
            .with_context("methods");
        assert!(p.matches(&link("attention", RelationType::Introduces, Some("methods"))));
        assert!(!p.matches(&link("attention", RelationType::Discusses, Some("methods"))));
        assert!(!p.matches(&link("attention", RelationType::Introduces, None)));
    }

    #[test]
    fn normalized_trims_entity_and_drops_blank_context() {
        let raw: SearchPattern =
            serde_json::from_str(r#"{"entity":" transformer ","context":"  "}"#).unwrap();
        let p = raw.normalized();
        assert_eq!(p, SearchPattern::entity("transformer"));
        assert!(p.matches(&link("transformer", RelationType::Extends, None)));

        let q = SearchPattern::entity("attention").with_context(" methods ").normalized();
        assert_eq!(q.context.as_deref(), Some("methods"));
    }

    #[test]
    fn parses_compact_form() {
        let p: SearchPattern = "attention::methods".parse().unwrap();
        assert_eq!(p, SearchPattern::entity("attention").with_context("methods"));

        let q: SearchPattern = "transformer:introduces".parse().unwrap();
        assert_eq!(
            q,
            SearchPattern::entity("transformer").with_relation(RelationType::Introduces)
        );
    }

    #[test]
    fn compact_form_rejects_bad_relation_and_empty_entity() {
        assert!("transformer:invalid_type".parse::<SearchPattern>().is_err());
        assert!(":introduces".parse::<SearchPattern>().is_err());
    }

    #[test]
    fn bulk_entry_rejects_unknown_relation_in_json() {
        let bad = serde_json::from_str::<BulkLinkEntry>(
            r#"{"name":"attention","relation_type":"ponders"}"#,
        );
        assert!(bad.is_err());
    }
}
