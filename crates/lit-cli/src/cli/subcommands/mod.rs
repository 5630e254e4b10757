mod graph;
mod item;

pub use graph::GraphCommands;
pub use item::{ItemAddArgs, ItemCommands};
