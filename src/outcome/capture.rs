//! Outcome capture, validation, and follow-up generation.
//!
//! Capturing validates the outcome string against the category's closed
//! list and, on success, returns a deterministic record: identical inputs
//! produce structurally identical captures, so a retried request is
//! harmless. Timing values are carried as hour offsets; the coordinator
//! anchors them to a clock when materializing follow-ups.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::constants::timeline_events;
use crate::error::OutcomeError;
use crate::models::{ChecklistItem, EvidenceRef, FollowUpSpec, OutcomeResult, TimelineEntry};

use super::templates::{template_for, OutcomeCategory};

/// A validated, recorded outcome for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedOutcome {
    pub task_id: String,
    pub category: OutcomeCategory,
    pub outcome: String,
    /// Result tier the outcome string maps to in its category template.
    pub result: OutcomeResult,
    pub notes: String,
    pub evidence: Vec<EvidenceRef>,
    pub follow_up_required: bool,
    /// Offset until the next check-in, from the first matching follow-up
    /// rule. None when the outcome needs no follow-up.
    pub next_check_in_hours: Option<f64>,
}

/// Validate and record an outcome. No side effects on failure.
pub fn capture_outcome(
    task_id: &str,
    category: OutcomeCategory,
    outcome: &str,
    notes: &str,
    evidence: Vec<EvidenceRef>,
) -> Result<CapturedOutcome, OutcomeError> {
    let template = template_for(category);
    let Some(option) = template.option(outcome) else {
        return Err(OutcomeError::InvalidOutcome {
            outcome: outcome.to_string(),
            category: category.to_string(),
        });
    };

    let matching_rule = template
        .follow_up_rules
        .iter()
        .find(|rule| rule.outcome == outcome);

    info!(
        task_id = %task_id,
        category = %category,
        outcome = %outcome,
        result = %option.result,
        "outcome captured"
    );

    Ok(CapturedOutcome {
        task_id: task_id.to_string(),
        category,
        outcome: outcome.to_string(),
        result: option.result,
        notes: notes.to_string(),
        evidence,
        follow_up_required: matching_rule.is_some(),
        next_check_in_hours: matching_rule.map(|rule| rule.due_in_hours),
    })
}

/// Follow-up task specs for an outcome. Pure function of the template
/// tables; unknown outcomes yield nothing.
pub fn generate_follow_up_tasks(category: OutcomeCategory, outcome: &str) -> Vec<FollowUpSpec> {
    template_for(category)
        .follow_up_rules
        .iter()
        .filter(|rule| rule.outcome == outcome)
        .map(|rule| FollowUpSpec {
            title: rule.title.to_string(),
            description: rule.description.to_string(),
            priority: rule.priority,
            estimated_minutes: rule.estimated_minutes,
            checklist: rule
                .checklist
                .iter()
                .map(|(text, required)| {
                    if *required {
                        ChecklistItem::required(text)
                    } else {
                        ChecklistItem::optional(text)
                    }
                })
                .collect(),
            due_in_hours: rule.due_in_hours,
        })
        .collect()
}

/// Build the immutable timeline entry for a captured outcome.
pub fn outcome_timeline_entry(
    captured: &CapturedOutcome,
    elder_id: &str,
    recorded_by: &str,
    occurred_at: chrono::DateTime<chrono::Utc>,
) -> TimelineEntry {
    let event_data = json!({
        "task_id": captured.task_id,
        "category": captured.category.to_string(),
        "outcome": captured.outcome,
        "result": captured.result.to_string(),
        "notes": captured.notes,
        "follow_up_required": captured.follow_up_required,
    });
    TimelineEntry::new(
        Uuid::new_v4().to_string(),
        elder_id,
        timeline_events::OUTCOME_CAPTURED,
        event_data,
        occurred_at,
        recorded_by,
    )
    .with_related(vec![captured.task_id.clone()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_outcome_rejected() {
        let err = capture_outcome(
            "task-1",
            OutcomeCategory::Medication,
            "Doses doubled",
            "",
            vec![],
        )
        .unwrap_err();
        assert_eq!(
            err,
            OutcomeError::InvalidOutcome {
                outcome: "Doses doubled".to_string(),
                category: "medication".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid outcome 'Doses doubled' for category 'medication'"
        );
    }

    #[test]
    fn test_success_outcome_needs_no_follow_up() {
        let captured = capture_outcome(
            "task-1",
            OutcomeCategory::Medication,
            "All doses verified and taken",
            "Went smoothly",
            vec![],
        )
        .unwrap();
        assert_eq!(captured.result, OutcomeResult::Success);
        assert!(!captured.follow_up_required);
        assert_eq!(captured.next_check_in_hours, None);
        assert!(generate_follow_up_tasks(
            OutcomeCategory::Medication,
            "All doses verified and taken"
        )
        .is_empty());
    }

    #[test]
    fn test_failed_outcome_triggers_follow_up() {
        let captured = capture_outcome(
            "task-1",
            OutcomeCategory::Medication,
            "Unable to verify",
            "",
            vec![],
        )
        .unwrap();
        assert_eq!(captured.result, OutcomeResult::Failed);
        assert!(captured.follow_up_required);
        assert_eq!(captured.next_check_in_hours, Some(1.0));

        let follow_ups =
            generate_follow_up_tasks(OutcomeCategory::Medication, "Unable to verify");
        assert_eq!(follow_ups.len(), 1);
        assert_eq!(follow_ups[0].title, "Escalate medication verification issue");
        assert!(follow_ups[0].due_in_hours > 0.0);
        assert!(follow_ups[0].estimated_minutes > 0);
    }

    #[test]
    fn test_capture_is_idempotent() {
        let capture = || {
            capture_outcome(
                "task-9",
                OutcomeCategory::Safety,
                "Minor safety issues found",
                "Loose rug in hallway",
                vec![EvidenceRef {
                    kind: "photo".to_string(),
                    reference: "photo-17".to_string(),
                }],
            )
            .unwrap()
        };
        let first = capture();
        let second = capture();
        let third = capture();
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_follow_up_generation_is_pure() {
        let a = generate_follow_up_tasks(OutcomeCategory::General, "Not completed");
        let b = generate_follow_up_tasks(OutcomeCategory::General, "Not completed");
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].priority, crate::models::Severity::High);
    }

    #[test]
    fn test_unknown_outcome_yields_no_follow_ups() {
        assert!(generate_follow_up_tasks(OutcomeCategory::General, "No such outcome").is_empty());
    }

    #[test]
    fn test_timeline_entry_embeds_outcome() {
        let captured = capture_outcome(
            "task-1",
            OutcomeCategory::Appointment,
            "Appointment rescheduled",
            "Doctor was out sick",
            vec![],
        )
        .unwrap();
        let entry = outcome_timeline_entry(&captured, "elder-1", "sarah", chrono::Utc::now());

        assert_eq!(entry.event_type, "outcome_captured");
        assert!(entry.immutable);
        assert_eq!(entry.event_data["task_id"], "task-1");
        assert_eq!(entry.event_data["category"], "appointment");
        assert_eq!(entry.event_data["outcome"], "Appointment rescheduled");
        assert_eq!(entry.event_data["result"], "partial");
        assert_eq!(entry.related_items, vec!["task-1".to_string()]);
    }
}
