use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Item { action } => commands::item::handle(&action, ctx, flags).await,
        Commands::Link(args) => commands::link::handle_link(&args, ctx, flags).await,
        Commands::LinkBulk(args) => commands::link::handle_bulk(&args, ctx, flags).await,
        Commands::Unlink(args) => commands::link::handle_unlink(&args, ctx, flags).await,
        Commands::Links(args) => commands::link::handle_list(&args, ctx, flags).await,
        Commands::Search(args) => commands::search::handle(&args, ctx, flags).await,
        Commands::Evolution(args) => commands::evolution::handle(&args, ctx, flags).await,
        Commands::Gaps(args) => commands::gaps::handle(&args, ctx, flags).await,
        Commands::Graph { action } => commands::graph::handle(&action, ctx, flags).await,
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
