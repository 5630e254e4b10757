//! # lit-config
//!
//! Layered configuration loading for litgraph using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LITGRAPH_*` prefix, `__` as separator)
//! 2. Project-level `.litgraph/config.toml`
//! 3. User-level `~/.config/litgraph/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LITGRAPH_DATABASE__PATH` -> `database.path`,
//! `LITGRAPH_GRAPH__REQUIRE_KNOWN_ENTITIES` -> `graph.require_known_entities`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use lit_config::LitConfig;
//!
//! let config = LitConfig::load_with_dotenv().expect("config");
//! if config.graph.is_configured() {
//!     println!("graph: {}", config.graph.path);
//! }
//! ```

mod database;
mod error;
mod general;
mod graph;
mod trail;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use graph::GraphConfig;
pub use trail::TrailConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for all litgraph settings.
pub const ENV_PREFIX: &str = "LITGRAPH_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LitConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub trail: TrailConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl LitConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse or a value
    /// has the wrong type, and `ConfigError::InvalidValue` for out-of-range
    /// settings.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is not an error.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".litgraph/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values the rest of the system cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.general.suggestion_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.suggestion_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// The graph path, or `NotConfigured` when no graph is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when `graph.path` is empty.
    pub fn require_graph_path(&self) -> Result<PathBuf, ConfigError> {
        self.graph.path_buf().ok_or_else(|| ConfigError::NotConfigured {
            section: "graph".into(),
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("litgraph").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LitConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.graph.is_configured());
        assert!(!config.trail.is_enabled());
    }

    #[test]
    fn missing_graph_is_not_configured() {
        let err = LitConfig::default().require_graph_path().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { section } if section == "graph"));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let mut config = LitConfig::default();
        config.general.default_limit = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
