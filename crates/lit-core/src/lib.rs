//! # lit-core
//!
//! Core types, identifiers, and error types for litgraph.
//!
//! This crate provides the foundational types shared across all litgraph crates:
//! - Entity structs for reading-list items, entity links, and graph entities
//! - Closed vocabularies (relation types, match modes, item status, sources)
//! - Literature identifier parsing (`source:local-id`)
//! - Time window parsing for evolution queries
//! - Cross-cutting error types
//! - Trail operation envelope for JSONL persistence
//! - Response types for the analysis operations

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod query;
pub mod responses;
pub mod trail;
pub mod window;
