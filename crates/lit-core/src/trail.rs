//! JSONL trail operation envelope.
//!
//! Every link mutation can be recorded as a `TrailOperation` line in
//! `{trail_dir}/links.jsonl`. The `v` field supports schema versioning: old
//! trail lines without a `v` field deserialize with `v == 1`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TrailOp;

const fn default_trail_version() -> u32 {
    1
}

/// A single link mutation recorded in the JSONL trail.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrailOperation {
    /// Schema version. Defaults to 1 for old trails without this field.
    #[serde(default = "default_trail_version")]
    pub v: u32,

    /// RFC 3339 timestamp of the operation.
    pub ts: String,

    pub op: TrailOp,

    pub item_id: String,

    pub entity_name: String,

    /// Full link state at the time of the operation.
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_version_defaults_to_one() {
        let json = r#"{"ts":"2026-02-08T12:00:00Z","op":"unlink","item_id":"arxiv:1","entity_name":"gpt","data":null}"#;
        let op: TrailOperation = serde_json::from_str(json).unwrap();
        assert_eq!(op.v, 1);
        assert_eq!(op.op, TrailOp::Unlink);
    }
}
