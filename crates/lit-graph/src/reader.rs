//! JSONL entity-graph reader.
//!
//! One JSON object per line. A line is classified as:
//!
//! - blank: ignored silently
//! - skipped: not UTF-8, not valid JSON, not an object, no string `name`, or a field of
//!   the wrong shape (e.g. non-string `observations`)
//! - ignored: well-formed, but `type` is present and not `"entity"`
//!   (memory-graph `relation` lines)
//! - entity: everything else; a later record with the same name replaces an
//!   earlier one
//!
//! Each call re-reads the file, so every operation sees a fresh snapshot.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use lit_core::entities::GraphEntity;
use lit_core::errors::CoreError;
use lit_core::responses::GraphLoadSummary;
use serde_json::Value;

use crate::error::GraphError;

enum LineKind {
    Blank,
    Skipped(String),
    Ignored,
    Entity(GraphEntity),
}

fn classify(raw: &[u8]) -> LineKind {
    let Ok(line) = std::str::from_utf8(raw) else {
        return LineKind::Skipped("not valid UTF-8".into());
    };
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return LineKind::Skipped(format!("invalid JSON: {e}")),
    };
    let Some(obj) = value.as_object() else {
        return LineKind::Skipped("not a JSON object".into());
    };
    if obj.get("type").is_some_and(|t| t.as_str() != Some("entity")) {
        return LineKind::Ignored;
    }
    if !obj.get("name").is_some_and(Value::is_string) {
        return LineKind::Skipped("missing string field 'name'".into());
    }
    match serde_json::from_value::<GraphEntity>(value) {
        Ok(entity) => LineKind::Entity(entity),
        Err(e) => LineKind::Skipped(format!("malformed entity: {e}")),
    }
}

/// In-memory snapshot of the entity graph, keyed by entity name.
#[derive(Debug, Clone, Default)]
pub struct EntityGraph {
    path: PathBuf,
    entities: HashMap<String, GraphEntity>,
    skipped: u32,
    ignored: u32,
}

impl EntityGraph {
    /// Load the graph file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::Io` if the file is missing or unreadable.
    /// Malformed lines never fail the load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let io_err = |source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        let mut graph = Self::from_reader(BufReader::new(file)).map_err(io_err)?;
        graph.path = path.to_path_buf();
        tracing::debug!(
            path = %path.display(),
            entities = graph.entities.len(),
            skipped = graph.skipped,
            ignored = graph.ignored,
            "loaded entity graph"
        );
        Ok(graph)
    }

    /// Parse a graph from any line source.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the source cannot be read. Lines
    /// with bad encoding are skipped, not errors.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut graph = Self::default();
        for (idx, line) in reader.split(b'\n').enumerate() {
            match classify(&line?) {
                LineKind::Blank => {}
                LineKind::Ignored => graph.ignored += 1,
                LineKind::Skipped(reason) => {
                    tracing::warn!(line = idx + 1, %reason, "skipping entity graph record");
                    graph.skipped += 1;
                }
                LineKind::Entity(entity) => {
                    graph.entities.insert(entity.name.clone(), entity);
                }
            }
        }
        Ok(graph)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GraphEntity> {
        self.entities.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of malformed lines.
    #[must_use]
    pub const fn skipped_records(&self) -> u32 {
        self.skipped
    }

    /// Number of well-formed non-entity lines.
    #[must_use]
    pub const fn ignored_records(&self) -> u32 {
        self.ignored
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names from `candidates` that are absent from the graph, sorted and deduplicated.
    #[must_use]
    pub fn missing<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut missing: Vec<String> = candidates
            .into_iter()
            .filter(|name| !self.contains(name))
            .map(str::to_string)
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// Fail with `Validation` if `name` is not a graph entity.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the unknown entity.
    pub fn ensure_known(&self, name: &str) -> Result<(), CoreError> {
        if self.contains(name.trim()) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "entity '{}' does not exist in the entity graph {}",
                name.trim(),
                self.path.display()
            )))
        }
    }

    /// Counts by entity type for reporting. Untyped entities count under `""`.
    #[must_use]
    pub fn summary(&self) -> GraphLoadSummary {
        let mut entity_types: BTreeMap<String, u32> = BTreeMap::new();
        for entity in self.entities.values() {
            *entity_types
                .entry(entity.entity_type.clone().unwrap_or_default())
                .or_default() += 1;
        }
        GraphLoadSummary {
            path: self.path.display().to_string(),
            entity_count: u32::try_from(self.entities.len()).unwrap_or(u32::MAX),
            skipped_records: self.skipped,
            ignored_records: self.ignored,
            entity_types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Cursor;

    fn parse(text: &str) -> EntityGraph {
        EntityGraph::from_reader(Cursor::new(text)).unwrap()
    }

    #[rstest]
    #[case("not json at all")]
    #[case("[1, 2, 3]")]
    #[case(r#"{"entityType":"Model"}"#)]
    #[case(r#"{"name": 42}"#)]
    #[case(r#"{"name":"x","observations":"not a list"}"#)]
    fn malformed_lines_are_skipped(#[case] line: &str) {
        let graph = parse(line);
        assert!(graph.is_empty());
        assert_eq!(graph.skipped_records(), 1);
        assert_eq!(graph.ignored_records(), 0);
    }

    #[test]
    fn non_utf8_line_is_skipped_and_neighbours_load() {
        let mut bytes = br#"{"name":"transformer","entityType":"Architecture"}"#.to_vec();
        bytes.push(b'\n');
        bytes.extend_from_slice(&[0xff, 0xfe, b'x', b'\n']);
        bytes.extend_from_slice(br#"{"name":"attention","entityType":"Mechanism"}"#);
        bytes.push(b'\n');

        let graph = EntityGraph::from_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(graph.len(), 2);
        assert!(graph.contains("transformer"));
        assert!(graph.contains("attention"));
        assert_eq!(graph.skipped_records(), 1);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let graph = parse("{\"name\":\"gpt\"}\r\n{\"name\":\"bert\"}\r\n");
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.skipped_records(), 0);
    }

    #[test]
    fn relation_lines_are_ignored_not_skipped() {
        let graph = parse(concat!(
            r#"{"type":"entity","name":"transformer","entityType":"Architecture"}"#,
            "\n",
            r#"{"type":"relation","from":"transformer","to":"attention","relationType":"uses"}"#,
            "\n\n   \n",
        ));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.ignored_records(), 1);
        assert_eq!(graph.skipped_records(), 0);
    }

    #[test]
    fn untyped_records_are_entities() {
        let graph = parse(r#"{"name":"bert","entity_type":"Model"}"#);
        assert!(graph.contains("bert"));
        assert_eq!(graph.get("bert").unwrap().entity_type.as_deref(), Some("Model"));
    }

    #[test]
    fn last_duplicate_wins() {
        let graph = parse(concat!(
            r#"{"name":"gpt","entityType":"Model"}"#,
            "\n",
            r#"{"name":"gpt","entityType":"LanguageModel"}"#,
        ));
        assert_eq!(graph.len(), 1);
        assert_eq!(
            graph.get("gpt").unwrap().entity_type.as_deref(),
            Some("LanguageModel")
        );
    }

    #[test]
    fn missing_is_sorted_and_deduplicated() {
        let graph = parse(r#"{"name":"a"}"#);
        assert_eq!(graph.missing(["c", "a", "b", "c"]), vec!["b", "c"]);
    }

    #[test]
    fn ensure_known_is_case_sensitive() {
        let graph = parse(r#"{"name":"transformer"}"#);
        assert!(graph.ensure_known("transformer").is_ok());
        assert!(graph.ensure_known("Transformer").unwrap_err().is_validation());
    }

    #[test]
    fn summary_counts_types() {
        let graph = parse(concat!(
            r#"{"name":"a","entityType":"Model"}"#,
            "\n",
            r#"{"name":"b","entityType":"Model"}"#,
            "\n",
            r#"{"name":"c"}"#,
        ));
        let summary = graph.summary();
        assert_eq!(summary.entity_count, 3);
        assert_eq!(summary.entity_types.get("Model"), Some(&2));
        assert_eq!(summary.entity_types.get(""), Some(&1));
    }
}
