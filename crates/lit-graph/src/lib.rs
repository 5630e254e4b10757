//! # lit-graph
//!
//! Reads the external JSONL entity graph and reconciles stored entity links
//! against it.
//!
//! - [`reader::EntityGraph`] parses the graph file into a name lookup,
//!   counting malformed and non-entity lines instead of failing on them.
//! - [`sync`] reports orphaned links (links whose entity is absent from the
//!   graph) and optionally removes them in one transaction.
//!
//! The graph file is never written.

pub mod error;
pub mod reader;
pub mod sync;

pub use error::GraphError;
pub use reader::EntityGraph;
