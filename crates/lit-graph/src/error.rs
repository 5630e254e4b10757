//! Graph error types for lit-graph.

use std::path::PathBuf;

use lit_core::errors::CoreError;
use lit_db::error::DatabaseError;

/// Errors from loading the entity graph or reconciling links against it.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The graph file could not be opened or read.
    #[error("cannot read entity graph {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the link store.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Domain error (e.g. an entity missing from the graph).
    #[error(transparent)]
    Core(#[from] CoreError),
}
