use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Append-only audit record of a workflow event.
///
/// `immutable` is a declared invariant, not a toggle: entries are never
/// mutated once written, and the timeline store rejects duplicate ids rather
/// than overwriting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: String,
    pub elder_id: String,
    pub event_type: String,
    pub participants: Vec<String>,
    pub event_data: Value,
    pub occurred_at: DateTime<Utc>,
    pub created_by: String,
    pub related_items: Vec<String>,
    pub immutable: bool,
}

impl TimelineEntry {
    pub fn new(
        id: impl Into<String>,
        elder_id: impl Into<String>,
        event_type: impl Into<String>,
        event_data: Value,
        occurred_at: DateTime<Utc>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            elder_id: elder_id.into(),
            event_type: event_type.into(),
            participants: Vec::new(),
            event_data,
            occurred_at,
            created_by: created_by.into(),
            related_items: Vec::new(),
            immutable: true,
        }
    }

    pub fn with_related(mut self, related: Vec<String>) -> Self {
        self.related_items = related;
        self
    }

    pub fn with_participants(mut self, participants: Vec<String>) -> Self {
        self.participants = participants;
        self
    }
}
