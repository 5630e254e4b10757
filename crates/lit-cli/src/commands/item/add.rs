use lit_core::entities::NewItem;
use lit_core::enums::ItemStatus;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ItemAddArgs;
use crate::commands::shared::parse::{parse_date, parse_enum};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: &ItemAddArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let new = build_new_item(args)?;
    let item = ctx.service.add_item(new).await?;
    output(&item, flags.format)
}

fn build_new_item(args: &ItemAddArgs) -> anyhow::Result<NewItem> {
    let mut new = NewItem::new(args.id.clone()).with_importance(args.importance);
    new.title.clone_from(&args.title);
    new.notes.clone_from(&args.notes);
    if let Some(status) = &args.status {
        new.status = parse_enum::<ItemStatus>(status, "status")?;
    }
    if let Some(added) = &args.added {
        new = new.with_added_date(parse_date(added, "added")?);
    }
    Ok(new)
}
