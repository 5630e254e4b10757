use lit_analysis::gaps::{GapQuery, find_gaps};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GapsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lit gaps`.
pub async fn handle(args: &GapsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let query = GapQuery {
        min_importance: args.min_importance,
        min_papers: args.min_papers,
        include_suggestions: args.suggestions,
        suggestion_limit: usize::try_from(ctx.config.general.suggestion_limit)?,
    };
    let report = find_gaps(&ctx.service, &query).await?;
    output(&report, flags.format)
}
