use anyhow::Context;
use lit_graph::sync::{sync, validate_links};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GraphCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lit graph`.
pub async fn handle(
    action: &GraphCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        GraphCommands::Load => {
            let graph = ctx.load_graph()?;
            output(&graph.summary(), flags.format)
        }
        GraphCommands::Validate => {
            let path = ctx.config.require_graph_path()?;
            let report = validate_links(&ctx.service, &path)
                .await
                .with_context(|| format!("failed to validate links against '{}'", path.display()))?;
            output(&report, flags.format)
        }
        GraphCommands::Sync {
            auto_remove,
            dry_run,
        } => {
            let path = ctx.config.require_graph_path()?;
            let report = sync(&ctx.service, &path, *auto_remove, *dry_run)
                .await
                .with_context(|| format!("failed to sync links against '{}'", path.display()))?;
            output(&report, flags.format)
        }
    }
}
