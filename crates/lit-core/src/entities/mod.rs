//! Entity structs for all litgraph domain objects.
//!
//! `Item` and `EntityLink` map to tables in the libSQL database; `GraphEntity`
//! is read from the external entity-graph file and never persisted.

mod graph;
mod item;
mod link;

pub use graph::GraphEntity;
pub use item::{Item, NewItem};
pub use link::EntityLink;
