mod add;
mod list;

use lit_core::enums::ItemStatus;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ItemCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ItemDeleteResponse {
    id: String,
    deleted: bool,
}

/// Handle `lit item`.
pub async fn handle(
    action: &ItemCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ItemCommands::Add(args) => add::run(args, ctx, flags).await,
        ItemCommands::Get { id } => {
            let item = ctx.service.get_item(id).await?;
            output(&item, flags.format)
        }
        ItemCommands::List { status, limit } => {
            list::run(status.as_deref(), *limit, ctx, flags).await
        }
        ItemCommands::Status { id, status } => {
            let status = parse_enum::<ItemStatus>(status, "status")?;
            let item = ctx.service.update_item_status(id, status).await?;
            output(&item, flags.format)
        }
        ItemCommands::Delete { id } => {
            let deleted = ctx.service.delete_item(id).await?;
            output(
                &ItemDeleteResponse {
                    id: id.clone(),
                    deleted,
                },
                flags.format,
            )
        }
    }
}
