use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events that drive queue item and task transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum QueueEvent {
    /// A responder picks the item up
    Start,
    /// Work is finished
    Complete,
    /// Defer the item until the given time
    Snooze { until: DateTime<Utc> },
    /// Hand the item to the escalation engine
    Escalate,
    /// Bring a snoozed item back to the top of the queue
    Reopen,
}

impl QueueEvent {
    /// Event name as recorded in timeline entries.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Snooze { .. } => "snooze",
            Self::Escalate => "escalate",
            Self::Reopen => "reopen",
        }
    }
}
