//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

/// Default number of related entities per research suggestion.
const fn default_suggestion_limit() -> u32 {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list/search commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// How many co-occurring entities a gap suggestion lists.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.suggestion_limit, 3);
    }
}
