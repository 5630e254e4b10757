//! Analysis error types for lit-analysis.

use lit_core::errors::CoreError;
use lit_db::error::DatabaseError;

/// Errors from the search, evolution, and gap analyses.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Error from the link store.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Invalid request (empty pattern list, bad window, out-of-range threshold).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AnalysisError {
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Core(e) => e.is_validation(),
            Self::Database(e) => e.is_validation(),
        }
    }
}
