//! Escalation detection and reassignment planning.
//!
//! `should_escalate` compares elapsed minutes against the per-severity
//! timeout, escalating only strictly past the threshold. Plans are built
//! fresh per trigger and chain into smaller-threshold next levels while
//! alternative candidates remain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::config::{AssignmentWeights, EscalationTimeouts};
use crate::models::{FamilyMember, QueueItem, Severity};

use super::engine::{rank_candidates, AssignmentContext};

/// How fast the escalation needs a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationUrgency {
    Immediate,
    WithinHour,
    WithinDay,
}

impl EscalationUrgency {
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Urgent => Self::Immediate,
            Severity::High => Self::WithinHour,
            Severity::Medium | Severity::Low => Self::WithinDay,
        }
    }
}

impl fmt::Display for EscalationUrgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => write!(f, "immediate"),
            Self::WithinHour => write!(f, "within_hour"),
            Self::WithinDay => write!(f, "within_day"),
        }
    }
}

/// Reassignment proposal for a stalled item. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationPlan {
    pub item_id: String,
    pub urgency: EscalationUrgency,
    /// Ranked reassignment candidates, current assignee excluded.
    pub candidates: Vec<FamilyMember>,
    pub message: String,
    pub timeout_minutes: i64,
    pub next_level: Option<Box<EscalationPlan>>,
}

impl EscalationPlan {
    /// Chain depth including this level.
    pub fn depth(&self) -> usize {
        1 + self.next_level.as_ref().map_or(0, |n| n.depth())
    }
}

/// True iff the elapsed time since `reference` strictly exceeds the
/// severity's timeout. Exactly at the threshold is not yet an escalation.
pub fn should_escalate(
    severity: Severity,
    reference: DateTime<Utc>,
    timeouts: &EscalationTimeouts,
    now: DateTime<Utc>,
) -> bool {
    QueueItem::minutes_since(reference, now) > timeouts.for_severity(severity)
}

/// Timeout check for a queue item, keyed off its due timestamp. Items
/// without a due time never time out.
pub fn item_should_escalate(
    item: &QueueItem,
    timeouts: &EscalationTimeouts,
    now: DateTime<Utc>,
) -> bool {
    match item.due_at {
        Some(due) => should_escalate(item.severity, due, timeouts, now),
        None => false,
    }
}

fn render_message(item: &QueueItem, urgency: EscalationUrgency, level: usize) -> String {
    let assignee = item.assigned_to.as_deref().unwrap_or("nobody");
    format!(
        "Escalation level {level}: '{}' for {} (severity {}) has stalled while assigned to {assignee}. Response needed {urgency}.",
        item.title, item.elder_name, item.severity
    )
}

fn build_level(
    item: &QueueItem,
    candidates: Vec<FamilyMember>,
    urgency: EscalationUrgency,
    timeout_minutes: i64,
    level: usize,
) -> EscalationPlan {
    // A next level exists only while someone beyond the current target
    // remains to take it over and the halved timeout still strictly
    // shrinks. At 1 minute the chain bottoms out.
    let next_level = if candidates.len() >= 2 && timeout_minutes > 1 {
        let remaining = candidates[1..].to_vec();
        let next_timeout = (timeout_minutes / 2).max(1);
        Some(Box::new(build_level(
            item,
            remaining,
            urgency,
            next_timeout,
            level + 1,
        )))
    } else {
        None
    };

    EscalationPlan {
        item_id: item.id.clone(),
        urgency,
        message: render_message(item, urgency, level),
        candidates,
        timeout_minutes,
        next_level,
    }
}

/// Build the escalation plan for a stalled item, ranking the roster with
/// the assignment engine and excluding the current assignee.
pub fn build_escalation_plan(
    item: &QueueItem,
    roster: &[FamilyMember],
    context: &AssignmentContext,
    weights: &AssignmentWeights,
    timeouts: &EscalationTimeouts,
) -> EscalationPlan {
    let eligible: Vec<FamilyMember> = roster
        .iter()
        .filter(|m| item.assigned_to.as_deref() != Some(m.id.as_str()))
        .cloned()
        .collect();

    let ranked = rank_candidates(&eligible, context, weights);
    let ordered: Vec<FamilyMember> = ranked
        .iter()
        .filter_map(|score| eligible.iter().find(|m| m.id == score.member_id).cloned())
        .collect();

    let urgency = EscalationUrgency::for_severity(item.severity);
    let timeout_minutes = match urgency {
        EscalationUrgency::Immediate => timeouts.urgent_minutes,
        EscalationUrgency::WithinHour => timeouts.high_minutes,
        EscalationUrgency::WithinDay => timeouts.low_minutes,
    };

    warn!(
        item_id = %item.id,
        severity = %item.severity,
        urgency = %urgency,
        candidates = ordered.len(),
        "escalation plan built"
    );

    build_level(item, ordered, urgency, timeout_minutes, 1)
}
