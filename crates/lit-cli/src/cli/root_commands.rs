use clap::{Args, Subcommand};

use crate::cli::subcommands::{GraphCommands, ItemCommands};

/// Top-level commands.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Reading-list items.
    Item {
        #[command(subcommand)]
        action: ItemCommands,
    },
    /// Link an item to a knowledge-graph entity (overwrites an existing link).
    Link(LinkArgs),
    /// Link an item to several entities in one transaction.
    #[command(name = "link-bulk")]
    LinkBulk(LinkBulkArgs),
    /// Remove the link between an item and an entity.
    Unlink(UnlinkArgs),
    /// List links for an item or an entity.
    Links(LinksArgs),
    /// Find items whose links match entity patterns.
    Search(SearchArgs),
    /// Trace how an entity's treatment changes over time.
    Evolution(EvolutionArgs),
    /// Report under-covered entities and sparse sections.
    Gaps(GapsArgs),
    /// Entity graph reconciliation.
    Graph {
        #[command(subcommand)]
        action: GraphCommands,
    },
    /// Print the JSON schema of a response or input type.
    Schema(SchemaArgs),
}

/// Arguments for `lit link`.
#[derive(Clone, Debug, Args)]
pub struct LinkArgs {
    /// Item identifier (`source:id`, bare ids are treated as custom).
    pub item_id: String,
    /// Entity name as it appears in the knowledge graph.
    pub entity: String,
    /// introduces, discusses, extends, evaluates, applies, critiques
    #[arg(short, long)]
    pub relation: String,
    /// Section of the item where the entity appears.
    #[arg(long)]
    pub context: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for `lit link-bulk`.
#[derive(Clone, Debug, Args)]
pub struct LinkBulkArgs {
    pub item_id: String,
    /// JSON array of `{"name", "relation_type", "context"?, "notes"?}`.
    pub entries: String,
    /// Context applied to entries that carry none.
    #[arg(long)]
    pub section: Option<String>,
}

/// Arguments for `lit unlink`.
#[derive(Clone, Debug, Args)]
pub struct UnlinkArgs {
    pub item_id: String,
    pub entity: String,
}

/// Arguments for `lit links`.
#[derive(Clone, Debug, Args)]
pub struct LinksArgs {
    #[arg(long, conflicts_with = "entity", required_unless_present = "entity")]
    pub item: Option<String>,
    #[arg(long)]
    pub entity: Option<String>,
}

/// Arguments for `lit search`.
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// `entity[:relation_type[:context]]`, repeatable.
    #[arg(short, long, required = true)]
    pub pattern: Vec<String>,
    /// any, all, exact
    #[arg(short, long, default_value = "any")]
    pub mode: String,
}

/// Arguments for `lit evolution`.
#[derive(Clone, Debug, Args)]
pub struct EvolutionArgs {
    pub entity: String,
    /// `YYYY`, `YYYY-YYYY`, `YYYY-MM-DD..YYYY-MM-DD` or `last-N(d|w|m|y)`.
    #[arg(short, long)]
    pub window: Option<String>,
    /// Include context, notes, importance and link time per occurrence.
    #[arg(long)]
    pub details: bool,
}

/// Arguments for `lit gaps`.
#[derive(Clone, Debug, Args)]
pub struct GapsArgs {
    /// Only items at or above this importance count (1-5).
    #[arg(long, default_value_t = 3)]
    pub min_importance: i64,
    /// Entities with fewer qualifying items are reported.
    #[arg(long, default_value_t = 2)]
    pub min_papers: u32,
    /// Add co-occurrence based research suggestions.
    #[arg(long)]
    pub suggestions: bool,
}

/// Arguments for `lit schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub type_name: String,
}
