//! Shared constants for queue lifecycle, priority scoring, and timeline
//! event naming.
//!
//! Keeping these in one place means the state machine, the stores, and the
//! coordinator all agree on transition legality and event vocabulary.

use crate::state_machine::QueueState;

/// Legal (from, to) transitions for queue items and tasks.
///
/// `Completed` has no outgoing entries; it is terminal and absorbing.
pub const QUEUE_TRANSITIONS: &[(QueueState, QueueState)] = &[
    (QueueState::New, QueueState::InProgress),
    (QueueState::New, QueueState::Snoozed),
    (QueueState::New, QueueState::Escalated),
    (QueueState::InProgress, QueueState::Completed),
    (QueueState::InProgress, QueueState::Snoozed),
    (QueueState::InProgress, QueueState::Escalated),
    (QueueState::Snoozed, QueueState::New),
    (QueueState::Snoozed, QueueState::InProgress),
    (QueueState::Snoozed, QueueState::Escalated),
    (QueueState::Escalated, QueueState::InProgress),
    (QueueState::Escalated, QueueState::Completed),
];

/// States in which an item still needs attention from someone.
pub const OPEN_STATES: &[QueueState] = &[
    QueueState::New,
    QueueState::InProgress,
    QueueState::Snoozed,
    QueueState::Escalated,
];

/// Timeline event type names.
pub mod timeline_events {
    pub const STATUS_CHANGED: &str = "status_changed";
    pub const OUTCOME_CAPTURED: &str = "outcome_captured";
    pub const ESCALATION_TRIGGERED: &str = "escalation_triggered";
    pub const EMERGENCY_CALL_INITIATED: &str = "emergency_call_initiated";
    pub const TRIAGE_COMPLETED: &str = "triage_completed";
    pub const ALERT_RECEIVED: &str = "alert_received";
    pub const TASK_CREATED: &str = "task_created";
    pub const FOLLOW_UP_CREATED: &str = "follow_up_created";
}

/// Priority score contributions. The worst case (urgent, overdue,
/// unassigned, escalation cap) sums to exactly 100, the score ceiling.
pub mod priority {
    /// Base contribution per severity tier.
    pub const SEVERITY_URGENT: u8 = 55;
    pub const SEVERITY_HIGH: u8 = 40;
    pub const SEVERITY_MEDIUM: u8 = 25;
    pub const SEVERITY_LOW: u8 = 10;

    /// Added when the due time is already past.
    pub const OVERDUE_BONUS: u8 = 25;
    /// Added when the item is due within the next 24 hours but not yet
    /// overdue. Mutually exclusive with the overdue bonus.
    pub const DUE_TODAY_BONUS: u8 = 10;
    /// Added while nobody owns the item.
    pub const UNASSIGNED_BONUS: u8 = 10;
    /// Per escalation level, capped.
    pub const ESCALATION_STEP: u8 = 5;
    pub const ESCALATION_CAP: u8 = 10;

    pub const MAX_SCORE: u8 = 100;
}

/// A repeat alert of the same type for the same elder within this window is
/// suppressed rather than queued again.
pub const DUPLICATE_ALERT_WINDOW_MINUTES: i64 = 30;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_has_no_outgoing_transitions() {
        assert!(!QUEUE_TRANSITIONS
            .iter()
            .any(|(from, _)| *from == QueueState::Completed));
    }

    #[test]
    fn test_every_open_state_has_an_exit() {
        for state in OPEN_STATES {
            assert!(QUEUE_TRANSITIONS.iter().any(|(from, _)| from == state));
        }
    }

    #[test]
    fn test_worst_case_priority_sums_to_ceiling() {
        let total = priority::SEVERITY_URGENT
            + priority::OVERDUE_BONUS
            + priority::UNASSIGNED_BONUS
            + priority::ESCALATION_CAP;
        assert_eq!(total, priority::MAX_SCORE);
    }
}
