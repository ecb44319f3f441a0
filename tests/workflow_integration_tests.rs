//! End-to-end coordinator tests: alert to triage to assignment to outcome,
//! with the timeline audited at each step.

use chrono::{Duration, Utc};

use careops_core::assignment::AssignmentContext;
use careops_core::models::{
    Alert, AlertType, FamilyMember, FamilyRole, QueueItemKind, Severity, Task,
};
use careops_core::outcome::OutcomeCategory;
use careops_core::state_machine::{QueueEvent, QueueState};
use careops_core::triage::{
    generate_call_script, EmergencyCallRequest, ProtocolType, ResponseValue, TriageProtocol,
};
use careops_core::Coordinator;
use std::collections::HashMap;

fn roster() -> Vec<FamilyMember> {
    let mut maria = FamilyMember::new("maria", "Maria", FamilyRole::Primary);
    maria.on_call = true;
    let james = FamilyMember::new("james", "James", FamilyRole::Secondary);
    let elena = FamilyMember::new("elena", "Elena", FamilyRole::Emergency);
    vec![maria, james, elena]
}

#[test]
fn test_fall_alert_through_triage_and_outcome() {
    let engine = Coordinator::with_defaults();
    let now = Utc::now();

    // 1. A fall alert lands on the queue.
    let alert = Alert::new(Severity::Urgent, AlertType::Fall, "elder-1", "Margaret");
    let alert_id = alert.id.clone();
    let item = engine.ingest_alert(alert, now).unwrap().unwrap();
    assert_eq!(item.kind, QueueItemKind::Alert);
    assert_eq!(item.suggested_action, "Start Urgent Triage Protocol");
    // Urgent severity, due today, unassigned: 55 + 10 + 10.
    assert_eq!(item.priority, 75);

    // 2. A responder picks it up.
    let recommendation = engine.recommend_assignee(&roster(), &AssignmentContext::default());
    engine
        .queue
        .assign(&item.id, Some(recommendation.assignee.id.clone()), now)
        .unwrap();
    let state = engine
        .transition_item(&item.id, &QueueEvent::Start, &recommendation.assignee.id, now)
        .unwrap();
    assert_eq!(state, QueueState::InProgress);

    // 3. Triage runs and the elder turns out stable.
    let mut protocol = TriageProtocol::new(&alert_id, ProtocolType::Fall);
    protocol.record_response("consciousness", ResponseValue::Bool(true));
    protocol.record_response("severe_injury", ResponseValue::Bool(false));
    protocol.record_response("pain_level_initial", ResponseValue::Number(2.0));
    protocol.record_response("mobility_status", ResponseValue::Bool(true));
    let plan = engine
        .complete_triage(&protocol, "elder-1", "Margaret", "maria", now)
        .unwrap();
    assert_eq!(plan.urgency_level, 4);

    // The monitoring follow-up is queued with a due time anchored to now.
    let follow_up = engine
        .queue
        .sorted_snapshot()
        .into_iter()
        .find(|i| i.kind == QueueItemKind::Followup)
        .unwrap();
    assert_eq!(follow_up.title, "Monitor post-fall condition");
    assert_eq!(follow_up.due_at, Some(now + Duration::minutes(240)));

    // 4. The original item is worked to completion.
    engine
        .transition_item(&item.id, &QueueEvent::Complete, "maria", now)
        .unwrap();
    assert_eq!(
        engine.queue.get(&item.id).unwrap().status,
        QueueState::Completed
    );

    // Every entry keys on the elder id, whatever source produced it, so
    // one elder query returns the whole story in order.
    let events: Vec<String> = engine
        .timeline
        .entries_for_elder("elder-1")
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(
        events,
        vec![
            "alert_received".to_string(),
            "status_changed".to_string(),
            "triage_completed".to_string(),
            "follow_up_created".to_string(),
            "status_changed".to_string(),
        ]
    );
}

#[test]
fn test_duplicate_alerts_are_suppressed_within_the_window() {
    let engine = Coordinator::with_defaults();
    let now = Utc::now();

    let first = Alert::new(Severity::High, AlertType::Medication, "elder-1", "Margaret");
    assert!(engine.ingest_alert(first, now).unwrap().is_some());

    // Same type and elder, lower severity, ten minutes later: suppressed.
    let mut repeat = Alert::new(Severity::Medium, AlertType::Medication, "elder-1", "Margaret");
    repeat.created_at = now + Duration::minutes(10);
    assert!(engine
        .ingest_alert(repeat, now + Duration::minutes(10))
        .unwrap()
        .is_none());

    // A more severe repeat always gets through.
    let mut worse = Alert::new(Severity::Urgent, AlertType::Medication, "elder-1", "Margaret");
    worse.created_at = now + Duration::minutes(10);
    assert!(engine
        .ingest_alert(worse, now + Duration::minutes(10))
        .unwrap()
        .is_some());

    // A different elder is never suppressed.
    let other = Alert::new(Severity::Medium, AlertType::Medication, "elder-2", "Harold");
    assert!(engine
        .ingest_alert(other, now + Duration::minutes(10))
        .unwrap()
        .is_some());
}

#[test]
fn test_stalled_urgent_item_escalates_once() {
    let engine = Coordinator::with_defaults();
    let now = Utc::now();

    let mut task = Task::new(
        "Confirm morning medications",
        "Check the pillbox and log the doses",
        Severity::Urgent,
        "elder-1",
        "Margaret",
        "system",
    );
    task.assigned_to = Some("maria".to_string());
    task.due_at = Some(now - Duration::minutes(30));
    let item = engine.ingest_task(&task, now).unwrap();

    let plans = engine
        .poll_escalations(&roster(), &AssignmentContext::default(), now)
        .unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].item_id, item.id);
    assert!(plans[0].candidates.iter().all(|m| m.id != "maria"));

    let escalated = engine.queue.get(&item.id).unwrap();
    assert_eq!(escalated.status, QueueState::Escalated);
    assert_eq!(escalated.escalation_level, 1);

    // A second sweep finds nothing new.
    let again = engine
        .poll_escalations(&roster(), &AssignmentContext::default(), now)
        .unwrap();
    assert!(again.is_empty());

    // Task intake and the escalation audit both key on the elder id.
    let events: Vec<String> = engine
        .timeline
        .entries_for_elder("elder-1")
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(
        events,
        vec![
            "task_created".to_string(),
            "escalation_triggered".to_string()
        ]
    );
}

#[test]
fn test_outcome_capture_feeds_the_queue_and_timeline() {
    let engine = Coordinator::with_defaults();
    let now = Utc::now();

    let captured = engine
        .capture_task_outcome(
            "task-77",
            "elder-1",
            "Margaret",
            OutcomeCategory::Medication,
            "Some doses missed",
            "Missed the noon dose",
            vec![],
            "james",
            now,
        )
        .unwrap();
    assert!(captured.follow_up_required);

    let follow_ups: Vec<_> = engine
        .queue
        .sorted_snapshot()
        .into_iter()
        .filter(|i| i.kind == QueueItemKind::Followup)
        .collect();
    assert_eq!(follow_ups.len(), 1);
    assert_eq!(follow_ups[0].severity, Severity::High);

    let events: Vec<String> = engine
        .timeline
        .entries_for_elder("elder-1")
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(
        events,
        vec![
            "outcome_captured".to_string(),
            "follow_up_created".to_string()
        ]
    );

    // An invalid outcome leaves no trace.
    let before = engine.timeline.len();
    assert!(engine
        .capture_task_outcome(
            "task-78",
            "elder-1",
            "Margaret",
            OutcomeCategory::Medication,
            "Probably fine",
            "",
            vec![],
            "james",
            now,
        )
        .is_err());
    assert_eq!(engine.timeline.len(), before);
}

#[test]
fn test_emergency_call_script_reaches_the_timeline() {
    let engine = Coordinator::with_defaults();
    let now = Utc::now();

    let mut responses = HashMap::new();
    responses.insert("consciousness".to_string(), ResponseValue::Bool(false));
    let request = EmergencyCallRequest {
        alert_id: "alert-9".to_string(),
        elder_id: "elder-1".to_string(),
        elder_name: "Margaret".to_string(),
        scenario: ProtocolType::Fall,
        urgency_level: 10,
        location: Some("12 Oak Lane".to_string()),
        triage_responses: responses,
        requested_by: Some("maria".to_string()),
    };

    let direct = generate_call_script(&request);
    let script = engine.initiate_emergency_call(&request, now).unwrap();
    assert_eq!(script, direct);
    assert!(script.primary_script.contains("The person is unconscious."));
    assert!(script.primary_script.contains("12 Oak Lane"));
    assert_eq!(script.current_condition, "Critical - Unconscious");

    let entries = engine.timeline.entries_for_elder("elder-1");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event_type, "emergency_call_initiated");
    assert_eq!(entries[0].related_items, vec!["alert-9".to_string()]);
}
