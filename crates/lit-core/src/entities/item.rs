use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ItemStatus, SourceType};

/// Default importance for newly added literature.
pub const DEFAULT_IMPORTANCE: i64 = 3;

/// A tracked piece of literature in the reading list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub source: SourceType,
    pub title: Option<String>,
    pub status: ItemStatus,
    pub importance: i64,
    pub notes: Option<String>,
    pub added_date: DateTime<Utc>,
}

/// Input for adding an item. `added_date` defaults to now when `None`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewItem {
    pub id: String,
    pub title: Option<String>,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default = "default_importance")]
    pub importance: i64,
    pub notes: Option<String>,
    pub added_date: Option<DateTime<Utc>>,
}

const fn default_importance() -> i64 {
    DEFAULT_IMPORTANCE
}

impl NewItem {
    /// Minimal item with default status and importance.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            status: ItemStatus::default(),
            importance: DEFAULT_IMPORTANCE,
            notes: None,
            added_date: None,
        }
    }

    #[must_use]
    pub const fn with_importance(mut self, importance: i64) -> Self {
        self.importance = importance;
        self
    }

    #[must_use]
    pub const fn with_added_date(mut self, added: DateTime<Utc>) -> Self {
        self.added_date = Some(added);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
