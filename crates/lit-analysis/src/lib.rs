//! # lit-analysis
//!
//! Read-only analyses over the entity links of a litgraph store:
//!
//! - [`search`]: find items whose links satisfy a set of entity patterns
//! - [`evolution`]: an entity's usage over time, ordered by item date
//! - [`gaps`]: under-covered entities and sections, with optional suggestions
//!
//! Each analysis has a pure core over loaded links and items, plus an async
//! entry point taking `&LitService`.

pub mod error;
pub mod evolution;
pub mod gaps;
pub mod search;

pub use error::AnalysisError;

pub(crate) fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
