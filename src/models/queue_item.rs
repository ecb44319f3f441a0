use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::alert::Alert;
use crate::models::task::Task;
use crate::state_machine::QueueState;

/// Severity tiers shared by alerts, tasks, and queue items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Urgent,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Numeric rank for ordering comparisons (urgent greatest).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Urgent => 3,
            Self::High => 2,
            Self::Medium => 1,
            Self::Low => 0,
        }
    }

    /// All tiers, most urgent first.
    pub const ALL: [Severity; 4] = [Self::Urgent, Self::High, Self::Medium, Self::Low];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Urgent => write!(f, "urgent"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgent" => Ok(Self::Urgent),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Invalid severity: {s}")),
        }
    }
}

/// Source variant a queue item was normalized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueItemKind {
    Alert,
    Task,
    Medication,
    Checkin,
    Followup,
}

impl fmt::Display for QueueItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alert => write!(f, "alert"),
            Self::Task => write!(f, "task"),
            Self::Medication => write!(f, "medication"),
            Self::Checkin => write!(f, "checkin"),
            Self::Followup => write!(f, "followup"),
        }
    }
}

/// Unified, displayable work unit in the care queue.
///
/// `priority` is always recomputed from severity, due timestamp, and
/// assignment state via [`crate::priority::priority_score`]; it is never
/// hand-set outside tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    pub id: String,
    pub kind: QueueItemKind,
    pub severity: Severity,
    pub title: String,
    pub elder_id: String,
    pub elder_name: String,
    pub due_at: Option<DateTime<Utc>>,
    pub estimated_minutes: u32,
    pub status: QueueState,
    pub suggested_action: String,
    pub priority: u8,
    pub assigned_to: Option<String>,
    /// How many times this item has been escalated; feeds the priority bonus.
    pub escalation_level: u32,
}

impl QueueItem {
    /// Normalize an alert into the unified queue shape. Pure mapping; the
    /// priority field is left at zero for the caller to compute against `now`.
    pub fn from_alert(alert: &Alert) -> Self {
        Self {
            id: alert.id.clone(),
            kind: QueueItemKind::Alert,
            severity: alert.severity,
            title: alert.title(),
            elder_id: alert.elder_id.clone(),
            elder_name: alert.elder_name.clone(),
            due_at: Some(alert.created_at),
            estimated_minutes: 15,
            status: QueueState::New,
            suggested_action: alert.suggested_action(),
            priority: 0,
            assigned_to: alert.assigned_to.clone(),
            escalation_level: 0,
        }
    }

    /// Normalize a task into the unified queue shape.
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            kind: QueueItemKind::Task,
            severity: task.priority,
            title: task.title.clone(),
            elder_id: task.elder_id.clone(),
            elder_name: task.elder_name.clone(),
            due_at: task.due_at,
            estimated_minutes: task.estimated_minutes,
            status: task.status,
            suggested_action: task.title.clone(),
            priority: 0,
            assigned_to: task.assigned_to.clone(),
            escalation_level: 0,
        }
    }

    /// Build a queue item for a scheduled medication reminder.
    pub fn medication_reminder(
        id: impl Into<String>,
        elder_id: impl Into<String>,
        elder_name: impl Into<String>,
        medication: &str,
        due_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: QueueItemKind::Medication,
            severity: Severity::High,
            title: format!("Medication: {medication}"),
            elder_id: elder_id.into(),
            elder_name: elder_name.into(),
            due_at: Some(due_at),
            estimated_minutes: 10,
            status: QueueState::New,
            suggested_action: format!("Verify {medication} was taken and log it"),
            priority: 0,
            assigned_to: None,
            escalation_level: 0,
        }
    }

    /// Build a queue item for a routine daily check-in call.
    pub fn check_in(
        id: impl Into<String>,
        elder_id: impl Into<String>,
        elder_name: impl Into<String>,
        due_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: QueueItemKind::Checkin,
            severity: Severity::Medium,
            title: "Daily check-in".to_string(),
            elder_id: elder_id.into(),
            elder_name: elder_name.into(),
            due_at: Some(due_at),
            estimated_minutes: 15,
            status: QueueState::New,
            suggested_action: "Call and complete the daily check-in".to_string(),
            priority: 0,
            assigned_to: None,
            escalation_level: 0,
        }
    }

    /// Minutes elapsed since the given reference timestamp, clamped at zero.
    pub fn minutes_since(reference: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        (now - reference).num_minutes().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_rank_ordering() {
        assert!(Severity::Urgent.rank() > Severity::High.rank());
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
    }

    #[test]
    fn test_severity_string_conversion() {
        assert_eq!(Severity::Urgent.to_string(), "urgent");
        assert_eq!("high".parse::<Severity>().unwrap(), Severity::High);
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_serde() {
        let json = serde_json::to_string(&Severity::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let parsed: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Severity::Medium);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(QueueItemKind::Medication.to_string(), "medication");
        assert_eq!(QueueItemKind::Followup.to_string(), "followup");
    }

    #[test]
    fn test_from_alert_titles_the_card_by_type_and_elder() {
        use crate::models::alert::AlertType;

        let alert = Alert::new(Severity::Urgent, AlertType::Fall, "elder-1", "Margaret");
        let item = QueueItem::from_alert(&alert);
        assert_eq!(item.title, "Fall alert for Margaret");
        assert_eq!(item.suggested_action, "Start Urgent Triage Protocol");
    }

    #[test]
    fn test_minutes_since_clamps_future_references() {
        let now = Utc::now();
        let past = now - chrono::Duration::minutes(42);
        assert_eq!(QueueItem::minutes_since(past, now), 42);
        let future = now + chrono::Duration::minutes(5);
        assert_eq!(QueueItem::minutes_since(future, now), 0);
    }

    #[test]
    fn test_medication_reminder_conversion() {
        let due = Utc::now();
        let item = QueueItem::medication_reminder("med-1", "elder-7", "Rose Chen", "Metformin", due);
        assert_eq!(item.kind, QueueItemKind::Medication);
        assert_eq!(item.severity, Severity::High);
        assert_eq!(item.title, "Medication: Metformin");
        assert_eq!(item.elder_id, "elder-7");
        assert_eq!(item.due_at, Some(due));
        assert_eq!(item.status, QueueState::New);
        assert!(item.assigned_to.is_none());
    }

    #[test]
    fn test_check_in_conversion() {
        let due = Utc::now();
        let item = QueueItem::check_in("ci-1", "elder-7", "Rose Chen", due);
        assert_eq!(item.kind, QueueItemKind::Checkin);
        assert_eq!(item.severity, Severity::Medium);
        assert_eq!(item.estimated_minutes, 15);
    }
}
