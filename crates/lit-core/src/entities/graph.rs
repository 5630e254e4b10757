use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record from the external entity graph.
///
/// Only `name` is required. The type is read from either `entityType` (the
/// memory-graph format) or `entity_type`. Every other field of the record is
/// kept verbatim in `extra`, so unknown record shapes survive a load.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GraphEntity {
    pub name: String,
    #[serde(default, rename = "entityType", alias = "entity_type")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_memory_graph_record() {
        let entity: GraphEntity = serde_json::from_str(
            r#"{"type":"entity","name":"transformer","entityType":"Architecture","observations":["2017"]}"#,
        )
        .unwrap();
        assert_eq!(entity.name, "transformer");
        assert_eq!(entity.entity_type.as_deref(), Some("Architecture"));
        assert_eq!(entity.observations, vec!["2017".to_string()]);
        assert_eq!(entity.extra.get("type"), Some(&Value::from("entity")));
    }

    #[test]
    fn accepts_snake_case_type_and_null() {
        let a: GraphEntity =
            serde_json::from_str(r#"{"name":"bert","entity_type":"Model"}"#).unwrap();
        assert_eq!(a.entity_type.as_deref(), Some("Model"));

        let b: GraphEntity =
            serde_json::from_str(r#"{"name":"odd","entityType":null}"#).unwrap();
        assert_eq!(b.entity_type, None);
    }

    #[test]
    fn missing_name_is_rejected() {
        assert!(serde_json::from_str::<GraphEntity>(r#"{"entityType":"Model"}"#).is_err());
    }

    #[test]
    fn keeps_unknown_fields() {
        let entity: GraphEntity =
            serde_json::from_str(r#"{"name":"gpt","entityType":"Model","params":175}"#).unwrap();
        assert_eq!(entity.extra.get("params"), Some(&Value::from(175)));
    }
}
