use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::queue_item::Severity;
use crate::models::task::ChecklistItem;

/// Three-way result tier for a captured outcome. Every outcome string in a
/// category template maps to exactly one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeResult {
    Success,
    Partial,
    Failed,
}

impl fmt::Display for OutcomeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Partial => write!(f, "partial"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Reference to a piece of supporting evidence (photo, note, document).
/// Category templates suggest which kinds apply; storage of the actual
/// payload belongs to the surrounding layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRef {
    pub kind: String,
    pub reference: String,
}

/// Specification for a follow-up task derived from an outcome or an action
/// plan. Pure data; the coordinator materializes it into a queue item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpSpec {
    pub title: String,
    pub description: String,
    pub priority: Severity,
    pub estimated_minutes: u32,
    pub checklist: Vec<ChecklistItem>,
    pub due_in_hours: f64,
}
