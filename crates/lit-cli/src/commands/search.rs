use lit_analysis::search::search_by_patterns;
use lit_core::enums::MatchMode;
use lit_core::query::SearchPattern;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::shared::limit::resolve_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lit search`.
pub async fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mode = parse_enum::<MatchMode>(&args.mode, "mode")?;
    let patterns = args
        .pattern
        .iter()
        .map(|raw| raw.parse::<SearchPattern>())
        .collect::<Result<Vec<_>, _>>()?;
    let limit = resolve_limit(None, flags.limit, ctx.config.general.default_limit)?;

    let response =
        search_by_patterns(&ctx.service, &patterns, mode, Some(usize::try_from(limit)?)).await?;
    output(&response, flags.format)
}
