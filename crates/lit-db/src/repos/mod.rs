//! Repository modules for the reading list and its entity links.
//!
//! Each module adds methods to `LitService` via `impl LitService` blocks.

pub mod item;
pub mod link;
