use lit_analysis::evolution::track_evolution;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EvolutionArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lit evolution`.
pub async fn handle(
    args: &EvolutionArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = track_evolution(
        &ctx.service,
        &args.entity,
        args.window.as_deref(),
        args.details,
    )
    .await?;
    output(&response, flags.format)
}
