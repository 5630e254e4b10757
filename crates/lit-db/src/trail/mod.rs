//! JSONL link trail.
//!
//! Link mutations are appended to `{trail_dir}/links.jsonl` so every removal
//! (including sync cleanups) leaves an on-disk record.

pub mod writer;
