use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::queue_item::Severity;
use crate::state_machine::QueueState;

/// Single checklist entry on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    pub completed: bool,
    pub required: bool,
}

impl ChecklistItem {
    pub fn required(text: &str) -> Self {
        Self {
            text: text.to_string(),
            completed: false,
            required: true,
        }
    }

    pub fn optional(text: &str) -> Self {
        Self {
            text: text.to_string(),
            completed: false,
            required: false,
        }
    }
}

/// Multi-step chore assigned to a caregiver. Shares the queue item lifecycle;
/// additionally carries a checklist that gates completion: the task cannot
/// reach `completed` while any required checklist item is incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Severity,
    pub elder_id: String,
    pub elder_name: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub assigned_to: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub estimated_minutes: u32,
    pub checklist: Vec<ChecklistItem>,
    pub status: QueueState,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Severity,
        elder_id: impl Into<String>,
        elder_name: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            priority,
            elder_id: elder_id.into(),
            elder_name: elder_name.into(),
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
            assigned_to: None,
            due_at: None,
            estimated_minutes: 30,
            checklist: Vec::new(),
            status: QueueState::New,
        }
    }

    /// Texts of required checklist items that are still incomplete.
    pub fn incomplete_required_items(&self) -> Vec<String> {
        self.checklist
            .iter()
            .filter(|item| item.required && !item.completed)
            .map(|item| item.text.clone())
            .collect()
    }

    /// True when every required checklist item has been marked complete.
    pub fn required_items_complete(&self) -> bool {
        self.incomplete_required_items().is_empty()
    }
}
