use clap::Subcommand;

/// Entity graph commands. All read the graph file named by `--graph` or `graph.path`.
#[derive(Clone, Debug, Subcommand)]
pub enum GraphCommands {
    /// Load the graph and summarize it.
    Load,
    /// Check that every linked entity exists in the graph.
    Validate,
    /// Find links to entities missing from the graph, optionally removing them.
    Sync {
        /// Remove orphaned links.
        #[arg(long)]
        auto_remove: bool,
        /// Report what would be removed without touching the store.
        #[arg(long)]
        dry_run: bool,
    },
}
