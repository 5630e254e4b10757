//! External entity-graph configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GraphConfig {
    /// Path to the JSONL entity graph. Empty means not configured.
    #[serde(default)]
    pub path: String,

    /// Refuse to link entity names that are absent from the graph.
    #[serde(default)]
    pub require_known_entities: bool,
}

impl GraphConfig {
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.path.is_empty()
    }

    /// The graph path, if one is configured.
    #[must_use]
    pub fn path_buf(&self) -> Option<PathBuf> {
        self.is_configured().then(|| PathBuf::from(&self.path))
    }
}
