//! Reading-list database configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    String::from(".litgraph/literature.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the local libSQL database file. `:memory:` opens a throwaway store.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
