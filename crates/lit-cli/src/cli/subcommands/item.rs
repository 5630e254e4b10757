use clap::{Args, Subcommand};

/// Reading-list item commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ItemCommands {
    /// Add an item to the reading list.
    Add(ItemAddArgs),
    /// Get an item by ID.
    Get { id: String },
    /// List items, newest first.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Change an item's reading status.
    Status { id: String, status: String },
    /// Delete an item and its links.
    Delete { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct ItemAddArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, default_value_t = 3)]
    pub importance: i64,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Date the item was added (`YYYY-MM-DD`), defaults to now.
    #[arg(long)]
    pub added: Option<String>,
}
