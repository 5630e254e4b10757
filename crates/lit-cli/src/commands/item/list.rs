use lit_core::entities::Item;
use lit_core::enums::ItemStatus;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::resolve_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ItemListResponse {
    items: Vec<Item>,
}

pub async fn run(
    status: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = resolve_limit(limit, flags.limit, ctx.config.general.default_limit)?;
    let status = status
        .map(|raw| parse_enum::<ItemStatus>(raw, "status"))
        .transpose()?;
    let items = ctx.service.list_items(status, limit).await?;
    output(&ItemListResponse { items }, flags.format)
}
