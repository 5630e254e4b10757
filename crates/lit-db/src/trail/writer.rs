//! JSONL trail writer.
//!
//! Appends `TrailOperation` records to `{trail_dir}/links.jsonl` using
//! `serde_jsonlines::append_json_lines` for per-line appends.

use std::path::{Path, PathBuf};

use lit_core::trail::TrailOperation;

use crate::error::DatabaseError;

/// File name of the link trail inside the trail directory.
pub const TRAIL_FILE: &str = "links.jsonl";

/// Appends link operations to the trail file.
///
/// `LitService` calls `append()` after a mutation commits, so the trail never
/// records a change that was rolled back.
pub struct TrailWriter {
    trail_dir: PathBuf,
    enabled: bool,
}

impl TrailWriter {
    /// Create a new `TrailWriter` pointing at the given directory.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created.
    pub fn new(trail_dir: PathBuf) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&trail_dir).map_err(|e| DatabaseError::Other(e.into()))?;
        Ok(Self {
            trail_dir,
            enabled: true,
        })
    }

    /// Create a disabled writer.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            trail_dir: PathBuf::new(),
            enabled: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append operations to the trail file. No-op when disabled.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file write fails.
    pub fn append_all(&self, ops: &[TrailOperation]) -> Result<(), DatabaseError> {
        if !self.enabled || ops.is_empty() {
            return Ok(());
        }
        serde_jsonlines::append_json_lines(self.trail_path(), ops)
            .map_err(|e| DatabaseError::Other(e.into()))?;
        Ok(())
    }

    /// Append a single operation.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file write fails.
    pub fn append(&self, op: &TrailOperation) -> Result<(), DatabaseError> {
        self.append_all(std::slice::from_ref(op))
    }

    #[must_use]
    pub fn trail_dir(&self) -> &Path {
        &self.trail_dir
    }

    /// Full path of the trail file.
    #[must_use]
    pub fn trail_path(&self) -> PathBuf {
        self.trail_dir.join(TRAIL_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lit_core::enums::TrailOp;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn op(op: TrailOp, entity: &str) -> TrailOperation {
        TrailOperation {
            v: 1,
            ts: "2026-02-08T12:00:00.000000Z".into(),
            op,
            item_id: "arxiv:1".into(),
            entity_name: entity.into(),
            data: serde_json::Value::Null,
        }
    }

    #[test]
    fn appends_lines_in_order() {
        let tmp = TempDir::new().unwrap();
        let writer = TrailWriter::new(tmp.path().join("trail")).unwrap();
        writer.append(&op(TrailOp::Link, "a")).unwrap();
        writer
            .append_all(&[op(TrailOp::Unlink, "a"), op(TrailOp::Link, "b")])
            .unwrap();

        let ops: Vec<TrailOperation> = serde_jsonlines::json_lines(writer.trail_path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        let names: Vec<_> = ops.iter().map(|o| (o.op, o.entity_name.as_str())).collect();
        assert_eq!(
            names,
            vec![(TrailOp::Link, "a"), (TrailOp::Unlink, "a"), (TrailOp::Link, "b")]
        );
    }

    #[test]
    fn disabled_writer_is_noop() {
        let writer = TrailWriter::disabled();
        assert!(!writer.is_enabled());
        writer.append(&op(TrailOp::Link, "a")).unwrap();
    }
}
