//! Cross-cutting error types for litgraph.
//!
//! Domain-specific errors (`DatabaseError`, `GraphError`, `AnalysisError`) are
//! defined in their respective crates and wrap `CoreError` transparently, so a
//! caller can always match on `NotFound` and `Validation` regardless of which
//! layer raised them.

use thiserror::Error;

/// Errors that can be raised by any litgraph crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (unknown enum value, empty pattern list, bad range).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a missing reading-list item.
    #[must_use]
    pub fn item_not_found(id: &str) -> Self {
        Self::NotFound {
            entity_type: "item".to_string(),
            id: id.to_string(),
        }
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
