//! Priority scoring for queue items.
//!
//! The score is a pure function of severity, due time, assignment, and
//! escalation level, clamped to [0, 100]. The contributions are sized so
//! the worst case lands exactly on the ceiling, which keeps severity tiers
//! strictly ordered when everything else is equal.

use chrono::{DateTime, Duration, Utc};

use crate::constants::priority::*;
use crate::models::{QueueItem, Severity};

/// Compute the priority score for an item's current attributes.
pub fn priority_score(
    severity: Severity,
    due_at: Option<DateTime<Utc>>,
    unassigned: bool,
    escalation_level: u32,
    now: DateTime<Utc>,
) -> u8 {
    let mut score: u32 = match severity {
        Severity::Urgent => SEVERITY_URGENT,
        Severity::High => SEVERITY_HIGH,
        Severity::Medium => SEVERITY_MEDIUM,
        Severity::Low => SEVERITY_LOW,
    } as u32;

    if let Some(due) = due_at {
        if due < now {
            score += OVERDUE_BONUS as u32;
        } else if due - now <= Duration::hours(24) {
            score += DUE_TODAY_BONUS as u32;
        }
    }

    if unassigned {
        score += UNASSIGNED_BONUS as u32;
    }

    let escalation = (escalation_level * ESCALATION_STEP as u32).min(ESCALATION_CAP as u32);
    score += escalation;

    score.min(MAX_SCORE as u32) as u8
}

/// Recompute and store an item's priority.
pub fn reprioritize(item: &mut QueueItem, now: DateTime<Utc>) {
    item.priority = priority_score(
        item.severity,
        item.due_at,
        item.assigned_to.is_none(),
        item.escalation_level,
        now,
    );
}
