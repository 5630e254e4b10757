use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `lit` binary.
#[derive(Debug, Parser)]
#[command(
    name = "lit",
    version,
    about = "litgraph - link literature to a knowledge graph and analyze the links"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (overrides `database.path`)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Entity graph JSONL path (overrides `graph.path`)
    #[arg(long, global = true)]
    pub graph: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            database: self.database.clone(),
            graph: self.graph.clone(),
        }
    }
}
