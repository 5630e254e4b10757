//! Link trail configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrailConfig {
    /// Directory receiving `links.jsonl`. Empty disables the trail.
    #[serde(default)]
    pub dir: String,
}

impl TrailConfig {
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.dir.is_empty()
    }

    #[must_use]
    pub fn dir_buf(&self) -> Option<PathBuf> {
        self.is_enabled().then(|| PathBuf::from(&self.dir))
    }
}
