//! Literature identifiers in `source:local-id` form.
//!
//! `arxiv:2106.15928`, `semanticscholar:649def34`, `doi:10.1000/xyz`. A bare
//! id without a colon is treated as `custom:<id>`. The source prefix is
//! case-insensitive and normalized to lower case; the local part is kept as-is
//! (DOIs may themselves contain colons, so only the first one splits).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::enums::SourceType;
use crate::errors::CoreError;

/// A parsed, normalized literature identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiteratureId {
    pub source: SourceType,
    pub local_id: String,
}

impl LiteratureId {
    /// Parse an identifier string.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an unknown source prefix or an
    /// empty local part.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        let (source, local) = match raw.split_once(':') {
            Some((source, local)) => (source.parse::<SourceType>()?, local),
            None => (SourceType::Custom, raw),
        };
        if local.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "literature id '{raw}' has an empty local part"
            )));
        }
        Ok(Self {
            source,
            local_id: local.to_string(),
        })
    }

    /// Whether `raw` parses as a literature id.
    #[must_use]
    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    /// The canonical `source:local-id` string used as the storage key.
    #[must_use]
    pub fn full_id(&self) -> String {
        format!("{}:{}", self.source, self.local_id)
    }
}

impl fmt::Display for LiteratureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.local_id)
    }
}

impl FromStr for LiteratureId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("arxiv:2106.15928", SourceType::Arxiv, "2106.15928")]
    #[case("ArXiv:2312.0001", SourceType::Arxiv, "2312.0001")]
    #[case("semanticscholar:649def34", SourceType::Semanticscholar, "649def34")]
    #[case("doi:10.1000:abc", SourceType::Doi, "10.1000:abc")]
    #[case("paper1", SourceType::Custom, "paper1")]
    fn parses_sources(#[case] raw: &str, #[case] source: SourceType, #[case] local: &str) {
        let id = LiteratureId::parse(raw).unwrap();
        assert_eq!(id.source, source);
        assert_eq!(id.local_id, local);
    }

    #[test]
    fn bare_id_normalizes_to_custom() {
        assert_eq!(LiteratureId::parse("paper1").unwrap().full_id(), "custom:paper1");
    }

    #[test]
    fn source_is_lowercased_in_full_id() {
        assert_eq!(
            LiteratureId::parse("DOI:10.1/x").unwrap().to_string(),
            "doi:10.1/x"
        );
    }

    #[rstest]
    #[case("pubmed:123")]
    #[case("arxiv:")]
    #[case("")]
    fn rejects_invalid(#[case] raw: &str) {
        assert!(!LiteratureId::is_valid(raw));
    }
}
