pub mod dispatch;
pub mod evolution;
pub mod gaps;
pub mod graph;
pub mod item;
pub mod link;
pub mod schema;
pub mod search;
pub mod shared;
