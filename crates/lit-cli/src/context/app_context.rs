use anyhow::Context;
use lit_config::LitConfig;
use lit_db::service::LitService;
use lit_graph::EntityGraph;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: LitService,
    pub config: LitConfig,
}

impl AppContext {
    /// Apply flag overrides to `config` and open the link store.
    pub async fn init(mut config: LitConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        apply_overrides(&mut config, flags);
        config.validate()?;

        let service = LitService::new_local(&config.database.path, config.trail.dir_buf())
            .await
            .with_context(|| format!("failed to open database '{}'", config.database.path))?;

        tracing::debug!(
            database = %config.database.path,
            in_memory = config.database.is_in_memory(),
            graph = %config.graph.path,
            trail = service.trail().is_enabled(),
            "application context ready"
        );

        Ok(Self { service, config })
    }

    /// Read the configured entity graph.
    pub fn load_graph(&self) -> anyhow::Result<EntityGraph> {
        let path = self.config.require_graph_path()?;
        EntityGraph::load(&path)
            .with_context(|| format!("failed to load entity graph '{}'", path.display()))
    }

    /// Refuse entity names absent from the graph when `graph.require_known_entities` is set.
    pub fn check_known_entities<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> anyhow::Result<()> {
        if !self.config.graph.require_known_entities {
            return Ok(());
        }
        let graph = self.load_graph()?;
        for name in names {
            graph.ensure_known(name)?;
        }
        Ok(())
    }
}

fn apply_overrides(config: &mut LitConfig, flags: &GlobalFlags) {
    if let Some(database) = &flags.database {
        config.database.path.clone_from(database);
    }
    if let Some(graph) = &flags.graph {
        config.graph.path.clone_from(graph);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use lit_config::LitConfig;

    use super::{AppContext, apply_overrides};
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(database: Option<&str>, graph: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            database: database.map(str::to_string),
            graph: graph.map(str::to_string),
        }
    }

    #[test]
    fn flags_override_config_paths() {
        let mut config = LitConfig::default();
        apply_overrides(&mut config, &flags(Some(":memory:"), Some("memory.jsonl")));
        assert_eq!(config.database.path, ":memory:");
        assert_eq!(config.graph.path, "memory.jsonl");
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut config = LitConfig::default();
        config.graph.path = "kept.jsonl".into();
        apply_overrides(&mut config, &flags(None, None));
        assert_eq!(config.graph.path, "kept.jsonl");
    }

    #[tokio::test]
    async fn known_entity_check_only_applies_when_enabled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let graph_path = dir.path().join("memory.jsonl");
        let mut file = std::fs::File::create(&graph_path).expect("graph file");
        writeln!(file, r#"{{"type":"entity","name":"transformer","entityType":"Architecture"}}"#)
            .expect("write graph");

        let mut config = LitConfig::default();
        config.graph.path = graph_path.to_string_lossy().into_owned();
        let mut ctx = AppContext::init(config, &flags(Some(":memory:"), None))
            .await
            .expect("context should init");

        ctx.check_known_entities(["ghost"]).expect("check is off by default");

        ctx.config.graph.require_known_entities = true;
        ctx.check_known_entities(["transformer"]).expect("known entity passes");
        let err = ctx.check_known_entities(["ghost"]).expect_err("unknown entity fails");
        assert!(err.to_string().contains("ghost"));
    }

    #[tokio::test]
    async fn unconfigured_graph_is_reported() {
        let ctx = AppContext::init(LitConfig::default(), &flags(Some(":memory:"), None))
            .await
            .expect("context should init");
        let err = ctx.load_graph().expect_err("graph is not configured");
        assert!(err.to_string().contains("graph"));
    }
}
