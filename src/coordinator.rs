//! Workflow coordinator.
//!
//! Owns the queue and timeline stores and wires the decision pieces
//! together: alert/task intake with duplicate suppression, status
//! transitions with audit entries, outcome capture with follow-up
//! materialization, triage completion, emergency calls, and escalation
//! polling. All operations are synchronous; callers supply `now`.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assignment::{
    build_escalation_plan, calculate_best_assignee, item_should_escalate, AssignmentContext,
    AssignmentRecommendation, EscalationPlan,
};
use crate::config::{AssignmentWeights, EscalationTimeouts};
use crate::constants::{timeline_events, DUPLICATE_ALERT_WINDOW_MINUTES};
use crate::error::Result;
use crate::models::{
    Alert, EvidenceRef, FamilyMember, FollowUpSpec, QueueItem, QueueItemKind, Task, TimelineEntry,
};
use crate::outcome::{
    capture_outcome, generate_follow_up_tasks, outcome_timeline_entry, CapturedOutcome,
    OutcomeCategory,
};
use crate::priority::reprioritize;
use crate::state_machine::{QueueEvent, QueueState};
use crate::store::{QueueStore, TimelineStore};
use crate::triage::{generate_call_script, ActionPlan, CallScript, EmergencyCallRequest, TriageProtocol};

pub struct Coordinator {
    pub queue: QueueStore,
    pub timeline: TimelineStore,
    weights: AssignmentWeights,
    timeouts: EscalationTimeouts,
    recent_alerts: RwLock<Vec<Alert>>,
}

impl Coordinator {
    /// Build a coordinator, validating the supplied configuration.
    pub fn new(weights: AssignmentWeights, timeouts: EscalationTimeouts) -> Result<Self> {
        weights.validate()?;
        timeouts.validate()?;
        Ok(Self {
            queue: QueueStore::new(),
            timeline: TimelineStore::new(),
            weights,
            timeouts,
            recent_alerts: RwLock::new(Vec::new()),
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            queue: QueueStore::new(),
            timeline: TimelineStore::new(),
            weights: AssignmentWeights::default(),
            timeouts: EscalationTimeouts::default(),
            recent_alerts: RwLock::new(Vec::new()),
        }
    }

    /// Ingest a safety alert. Returns the queued item, or `None` when a
    /// same-type alert for the same elder with equal or higher severity
    /// arrived within the suppression window.
    pub fn ingest_alert(&self, alert: Alert, now: DateTime<Utc>) -> Result<Option<QueueItem>> {
        if self.is_duplicate_alert(&alert, now) {
            info!(
                alert_id = %alert.id,
                elder_id = %alert.elder_id,
                alert_type = ?alert.alert_type,
                "duplicate alert suppressed"
            );
            return Ok(None);
        }

        let mut item = QueueItem::from_alert(&alert);
        reprioritize(&mut item, now);
        self.queue.upsert(item.clone());

        self.timeline.append(
            TimelineEntry::new(
                Uuid::new_v4().to_string(),
                &alert.elder_id,
                timeline_events::ALERT_RECEIVED,
                json!({
                    "alert_id": alert.id,
                    "alert_type": alert.alert_type,
                    "severity": alert.severity.to_string(),
                }),
                now,
                "system",
            )
            .with_related(vec![item.id.clone()]),
        )?;

        self.remember_alert(alert, now);
        Ok(Some(item))
    }

    /// Ingest a scheduled task into the queue.
    pub fn ingest_task(&self, task: &Task, now: DateTime<Utc>) -> Result<QueueItem> {
        let mut item = QueueItem::from_task(task);
        reprioritize(&mut item, now);
        self.queue.upsert(item.clone());

        self.timeline.append(
            TimelineEntry::new(
                Uuid::new_v4().to_string(),
                &task.elder_id,
                timeline_events::TASK_CREATED,
                json!({
                    "task_id": task.id,
                    "title": task.title,
                    "priority": task.priority.to_string(),
                }),
                now,
                &task.created_by,
            )
            .with_related(vec![item.id.clone()]),
        )?;
        Ok(item)
    }

    /// Apply a lifecycle event to a queue item and record the transition.
    pub fn transition_item(
        &self,
        item_id: &str,
        event: &QueueEvent,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<QueueState> {
        let before = self
            .queue
            .get(item_id)
            .map(|item| item.status)
            .unwrap_or_default();
        let state = self.queue.transition(item_id, event, now)?;
        let item = self.queue.get(item_id);

        self.timeline.append(
            TimelineEntry::new(
                Uuid::new_v4().to_string(),
                item.map(|i| i.elder_id).unwrap_or_default(),
                timeline_events::STATUS_CHANGED,
                json!({
                    "item_id": item_id,
                    "event": event.event_type(),
                    "from": before.to_string(),
                    "to": state.to_string(),
                }),
                now,
                actor,
            )
            .with_related(vec![item_id.to_string()]),
        )?;
        Ok(state)
    }

    /// Recommend an assignee for an item from the given roster.
    pub fn recommend_assignee(
        &self,
        roster: &[FamilyMember],
        context: &AssignmentContext,
    ) -> AssignmentRecommendation {
        calculate_best_assignee(roster, context, &self.weights)
    }

    /// Capture a task outcome, record it on the timeline, and materialize
    /// any follow-up tasks into the queue.
    pub fn capture_task_outcome(
        &self,
        task_id: &str,
        elder_id: &str,
        elder_name: &str,
        category: OutcomeCategory,
        outcome: &str,
        notes: &str,
        evidence: Vec<EvidenceRef>,
        recorded_by: &str,
        now: DateTime<Utc>,
    ) -> Result<CapturedOutcome> {
        let captured = capture_outcome(task_id, category, outcome, notes, evidence)?;
        self.timeline
            .append(outcome_timeline_entry(&captured, elder_id, recorded_by, now))?;

        for spec in generate_follow_up_tasks(category, outcome) {
            self.materialize_follow_up(&spec, elder_id, elder_name, task_id, recorded_by, now)?;
        }
        Ok(captured)
    }

    /// Generate the action plan for a triage run, record completion, and
    /// queue the plan's follow-up tasks.
    pub fn complete_triage(
        &self,
        protocol: &TriageProtocol,
        elder_id: &str,
        elder_name: &str,
        completed_by: &str,
        now: DateTime<Utc>,
    ) -> Result<ActionPlan> {
        let plan = protocol.generate_action_plan();

        self.timeline.append(
            TimelineEntry::new(
                Uuid::new_v4().to_string(),
                elder_id,
                timeline_events::TRIAGE_COMPLETED,
                json!({
                    "alert_id": protocol.alert_id,
                    "protocol_type": protocol.protocol_type.to_string(),
                    "recommendation": plan.recommendation,
                    "urgency_level": plan.urgency_level,
                }),
                now,
                completed_by,
            )
            .with_related(vec![protocol.alert_id.clone()])
            .with_participants(vec![elder_name.to_string()]),
        )?;

        for spec in &plan.follow_up_tasks {
            self.materialize_follow_up(
                spec,
                elder_id,
                elder_name,
                &protocol.alert_id,
                completed_by,
                now,
            )?;
        }

        Ok(plan)
    }

    /// Generate the dispatcher call script for an emergency and record the
    /// call on the timeline.
    pub fn initiate_emergency_call(
        &self,
        request: &EmergencyCallRequest,
        now: DateTime<Utc>,
    ) -> Result<CallScript> {
        let script = generate_call_script(request);
        warn!(
            alert_id = %request.alert_id,
            scenario = %request.scenario,
            "emergency call initiated"
        );

        self.timeline.append(
            TimelineEntry::new(
                Uuid::new_v4().to_string(),
                &request.elder_id,
                timeline_events::EMERGENCY_CALL_INITIATED,
                json!({
                    "alert_id": request.alert_id,
                    "scenario": request.scenario.to_string(),
                    "current_condition": script.current_condition,
                    "location": script.location,
                }),
                now,
                request.requested_by.as_deref().unwrap_or("system"),
            )
            .with_related(vec![request.alert_id.clone()]),
        )?;
        Ok(script)
    }

    /// Sweep open items for timeout breaches. Each stalled item transitions
    /// to `escalated` and yields a reassignment plan.
    pub fn poll_escalations(
        &self,
        roster: &[FamilyMember],
        context: &AssignmentContext,
        now: DateTime<Utc>,
    ) -> Result<Vec<EscalationPlan>> {
        let mut plans = Vec::new();
        for item in self.queue.open_items() {
            if item.status == QueueState::Escalated || !item_should_escalate(&item, &self.timeouts, now) {
                continue;
            }
            self.queue.transition(&item.id, &QueueEvent::Escalate, now)?;
            let escalated = self.queue.get(&item.id).unwrap_or(item);
            let plan =
                build_escalation_plan(&escalated, roster, context, &self.weights, &self.timeouts);

            self.timeline.append(
                TimelineEntry::new(
                    Uuid::new_v4().to_string(),
                    &escalated.elder_id,
                    timeline_events::ESCALATION_TRIGGERED,
                    json!({
                        "item_id": escalated.id,
                        "severity": escalated.severity.to_string(),
                        "escalation_level": escalated.escalation_level,
                        "candidates": plan.candidates.len(),
                    }),
                    now,
                    "system",
                )
                .with_related(vec![escalated.id.clone()]),
            )?;
            plans.push(plan);
        }
        Ok(plans)
    }

    /// Reset all shared state. Test isolation hook.
    pub fn clear(&self) {
        self.queue.clear();
        self.timeline.clear();
        self.recent_alerts.write().clear();
    }

    fn materialize_follow_up(
        &self,
        spec: &FollowUpSpec,
        elder_id: &str,
        elder_name: &str,
        source_id: &str,
        created_by: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let due_at = now + Duration::minutes((spec.due_in_hours * 60.0) as i64);
        let mut item = QueueItem {
            id: Uuid::new_v4().to_string(),
            kind: QueueItemKind::Followup,
            severity: spec.priority,
            title: spec.title.clone(),
            elder_id: elder_id.to_string(),
            elder_name: elder_name.to_string(),
            due_at: Some(due_at),
            estimated_minutes: spec.estimated_minutes,
            status: QueueState::New,
            suggested_action: spec.description.clone(),
            priority: 0,
            assigned_to: None,
            escalation_level: 0,
        };
        reprioritize(&mut item, now);
        self.queue.upsert(item.clone());

        self.timeline.append(
            TimelineEntry::new(
                Uuid::new_v4().to_string(),
                elder_id,
                timeline_events::FOLLOW_UP_CREATED,
                json!({
                    "item_id": item.id,
                    "title": spec.title,
                    "priority": spec.priority.to_string(),
                    "source": source_id,
                }),
                now,
                created_by,
            )
            .with_related(vec![item.id, source_id.to_string()]),
        )?;
        Ok(())
    }

    fn is_duplicate_alert(&self, alert: &Alert, now: DateTime<Utc>) -> bool {
        let window_start = now - Duration::minutes(DUPLICATE_ALERT_WINDOW_MINUTES);
        self.recent_alerts.read().iter().any(|existing| {
            existing.elder_id == alert.elder_id
                && existing.alert_type == alert.alert_type
                && existing.created_at >= window_start
                && existing.severity.rank() >= alert.severity.rank()
        })
    }

    fn remember_alert(&self, alert: Alert, now: DateTime<Utc>) {
        let window_start = now - Duration::minutes(DUPLICATE_ALERT_WINDOW_MINUTES);
        let mut recent = self.recent_alerts.write();
        recent.retain(|a| a.created_at >= window_start);
        recent.push(alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertType, Severity};

    fn alert(severity: Severity, alert_type: AlertType) -> Alert {
        Alert::new(severity, alert_type, "elder-1", "Margaret")
    }

    #[test]
    fn test_alert_ingestion_queues_and_records() {
        let coordinator = Coordinator::with_defaults();
        let now = Utc::now();
        let item = coordinator
            .ingest_alert(alert(Severity::Urgent, AlertType::Fall), now)
            .unwrap()
            .expect("first alert should queue");

        assert_eq!(coordinator.queue.len(), 1);
        assert!(item.priority > 0);
        let events: Vec<String> = coordinator
            .timeline
            .entries()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(events, vec!["alert_received"]);
    }

    #[test]
    fn test_duplicate_alert_suppressed_within_window() {
        let coordinator = Coordinator::with_defaults();
        let now = Utc::now();
        let mut first = alert(Severity::High, AlertType::Fall);
        first.created_at = now;
        coordinator.ingest_alert(first, now).unwrap();

        // Same type, same elder, lower severity, inside the window.
        let mut second = alert(Severity::Medium, AlertType::Fall);
        second.created_at = now + Duration::minutes(5);
        let result = coordinator
            .ingest_alert(second, now + Duration::minutes(5))
            .unwrap();
        assert!(result.is_none());
        assert_eq!(coordinator.queue.len(), 1);
    }

    #[test]
    fn test_higher_severity_is_not_suppressed() {
        let coordinator = Coordinator::with_defaults();
        let now = Utc::now();
        let mut first = alert(Severity::Medium, AlertType::Fall);
        first.created_at = now;
        coordinator.ingest_alert(first, now).unwrap();

        let mut second = alert(Severity::Urgent, AlertType::Fall);
        second.created_at = now + Duration::minutes(5);
        let result = coordinator
            .ingest_alert(second, now + Duration::minutes(5))
            .unwrap();
        assert!(result.is_some());
        assert_eq!(coordinator.queue.len(), 2);
    }

    #[test]
    fn test_alert_outside_window_queues_again() {
        let coordinator = Coordinator::with_defaults();
        let now = Utc::now();
        let mut first = alert(Severity::High, AlertType::Medication);
        first.created_at = now;
        coordinator.ingest_alert(first, now).unwrap();

        let later = now + Duration::minutes(DUPLICATE_ALERT_WINDOW_MINUTES + 1);
        let mut second = alert(Severity::High, AlertType::Medication);
        second.created_at = later;
        assert!(coordinator.ingest_alert(second, later).unwrap().is_some());
    }

    #[test]
    fn test_transition_appends_status_change() {
        let coordinator = Coordinator::with_defaults();
        let now = Utc::now();
        let item = coordinator
            .ingest_alert(alert(Severity::High, AlertType::Safety), now)
            .unwrap()
            .unwrap();

        let state = coordinator
            .transition_item(&item.id, &QueueEvent::Start, "sarah", now)
            .unwrap();
        assert_eq!(state, QueueState::InProgress);

        let entries = coordinator.timeline.entries();
        let status_entry = entries
            .iter()
            .find(|e| e.event_type == "status_changed")
            .unwrap();
        assert_eq!(status_entry.event_data["from"], "new");
        assert_eq!(status_entry.event_data["to"], "in_progress");
        assert_eq!(status_entry.created_by, "sarah");
    }

    #[test]
    fn test_outcome_capture_materializes_follow_ups() {
        let coordinator = Coordinator::with_defaults();
        let now = Utc::now();
        let captured = coordinator
            .capture_task_outcome(
                "task-1",
                "elder-1",
                "Margaret",
                OutcomeCategory::Medication,
                "Doses refused",
                "Refused evening dose",
                vec![],
                "sarah",
                now,
            )
            .unwrap();

        assert!(captured.follow_up_required);
        let snapshot = coordinator.queue.sorted_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].kind, QueueItemKind::Followup);
        assert_eq!(snapshot[0].title, "Investigate medication refusal");
        assert_eq!(
            snapshot[0].due_at,
            Some(now + Duration::minutes(120))
        );

        let events: Vec<String> = coordinator
            .timeline
            .entries()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(events, vec!["outcome_captured", "follow_up_created"]);
    }

    #[test]
    fn test_invalid_outcome_has_no_side_effects() {
        let coordinator = Coordinator::with_defaults();
        let result = coordinator.capture_task_outcome(
            "task-1",
            "elder-1",
            "Margaret",
            OutcomeCategory::General,
            "Nonsense outcome",
            "",
            vec![],
            "sarah",
            Utc::now(),
        );
        assert!(result.is_err());
        assert!(coordinator.queue.is_empty());
        assert!(coordinator.timeline.is_empty());
    }

    #[test]
    fn test_poll_escalations_flags_overdue_items() {
        let coordinator = Coordinator::with_defaults();
        let now = Utc::now();
        let mut overdue = alert(Severity::Urgent, AlertType::Fall);
        overdue.created_at = now - Duration::minutes(30);
        let item = coordinator
            .ingest_alert(overdue, now - Duration::minutes(30))
            .unwrap()
            .unwrap();

        let roster = vec![
            FamilyMember::new("m1", "Sarah", crate::models::FamilyRole::Primary),
            FamilyMember::new("m2", "Tom", crate::models::FamilyRole::Secondary),
        ];
        let plans = coordinator
            .poll_escalations(&roster, &AssignmentContext::default(), now)
            .unwrap();

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].item_id, item.id);
        let stored = coordinator.queue.get(&item.id).unwrap();
        assert_eq!(stored.status, QueueState::Escalated);
        assert_eq!(stored.escalation_level, 1);

        // A second poll does not escalate the same item again.
        let again = coordinator
            .poll_escalations(&roster, &AssignmentContext::default(), now)
            .unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn test_clear_resets_everything() {
        let coordinator = Coordinator::with_defaults();
        let now = Utc::now();
        coordinator
            .ingest_alert(alert(Severity::High, AlertType::Fall), now)
            .unwrap();
        coordinator.clear();
        assert!(coordinator.queue.is_empty());
        assert!(coordinator.timeline.is_empty());
        // The suppression window is reset too.
        assert!(coordinator
            .ingest_alert(alert(Severity::Low, AlertType::Fall), now)
            .unwrap()
            .is_some());
    }
}
