//! Database error types for lit-db.

use lit_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Domain error (not found, validation) raised before touching storage.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// The wrapped `CoreError`, if this is a domain error.
    #[must_use]
    pub const fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(e) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.as_core().is_some_and(CoreError::is_not_found)
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.as_core().is_some_and(CoreError::is_validation)
    }
}
