//! Table-driven state machine for queue items and tasks.
//!
//! Transitions are validated against the legal transition table before any
//! field is touched, so a rejected event leaves the entity unchanged.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::constants::QUEUE_TRANSITIONS;
use crate::models::{QueueItem, Task};

use super::errors::StateMachineError;
use super::events::QueueEvent;
use super::guards::{ChecklistCompleteGuard, StateGuard};
use super::states::QueueState;

/// Resolve the target state for an event. Pure function of the event.
pub fn determine_target_state(event: &QueueEvent) -> QueueState {
    match event {
        QueueEvent::Start => QueueState::InProgress,
        QueueEvent::Complete => QueueState::Completed,
        QueueEvent::Snooze { .. } => QueueState::Snoozed,
        QueueEvent::Escalate => QueueState::Escalated,
        QueueEvent::Reopen => QueueState::New,
    }
}

/// Check a (from, to) pair against the legal transition table.
pub fn validate_transition(from: QueueState, to: QueueState) -> Result<(), StateMachineError> {
    if QUEUE_TRANSITIONS.contains(&(from, to)) {
        Ok(())
    } else {
        Err(StateMachineError::IllegalTransition { from, to })
    }
}

fn validate_event(
    from: QueueState,
    event: &QueueEvent,
    now: DateTime<Utc>,
) -> Result<QueueState, StateMachineError> {
    let to = determine_target_state(event);
    validate_transition(from, to)?;
    if let QueueEvent::Snooze { until } = event {
        if *until <= now {
            return Err(StateMachineError::SnoozeTimeInPast);
        }
    }
    Ok(to)
}

/// Apply an event to a queue item, mutating status (and due time for
/// snoozes) only after the transition has fully validated.
pub fn apply_queue_event(
    item: &mut QueueItem,
    event: &QueueEvent,
    now: DateTime<Utc>,
) -> Result<QueueState, StateMachineError> {
    let to = validate_event(item.status, event, now)?;
    if let QueueEvent::Snooze { until } = event {
        item.due_at = Some(*until);
    }
    debug!(
        item_id = %item.id,
        from = %item.status,
        to = %to,
        event = event.event_type(),
        "queue item transition"
    );
    item.status = to;
    Ok(to)
}

/// Apply an event to a task. Completion is additionally guarded by the
/// task's required checklist items.
pub fn apply_task_event(
    task: &mut Task,
    event: &QueueEvent,
    now: DateTime<Utc>,
) -> Result<QueueState, StateMachineError> {
    let to = validate_event(task.status, event, now)?;
    ChecklistCompleteGuard.check(task, event)?;
    if let QueueEvent::Snooze { until } = event {
        task.due_at = Some(*until);
    }
    debug!(
        task_id = %task.id,
        from = %task.status,
        to = %to,
        event = event.event_type(),
        "task transition"
    );
    task.status = to;
    task.updated_at = now;
    Ok(to)
}
