use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RelationType;

/// A typed relationship between one reading-list item and one named entity.
///
/// `(item_id, entity_name)` is unique: re-linking overwrites `relation_type`,
/// `context`, and `notes` in place and keeps `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntityLink {
    pub item_id: String,
    pub entity_name: String,
    pub relation_type: RelationType,
    pub context: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
