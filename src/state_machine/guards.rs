use crate::models::Task;

use super::errors::StateMachineError;
use super::events::QueueEvent;

/// Guard evaluated before a transition is applied. Guards inspect the
/// entity and event and veto the transition with a specific error.
pub trait StateGuard<T> {
    fn check(&self, entity: &T, event: &QueueEvent) -> Result<(), StateMachineError>;
}

/// Blocks completion of a task while required checklist items remain open.
pub struct ChecklistCompleteGuard;

impl StateGuard<Task> for ChecklistCompleteGuard {
    fn check(&self, task: &Task, event: &QueueEvent) -> Result<(), StateMachineError> {
        if !matches!(event, QueueEvent::Complete) {
            return Ok(());
        }
        let incomplete = task.incomplete_required_items();
        if incomplete.is_empty() {
            Ok(())
        } else {
            Err(StateMachineError::IncompleteChecklist { items: incomplete })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChecklistItem, Severity, Task};

    fn task_with_checklist(items: Vec<ChecklistItem>) -> Task {
        let mut task = Task::new(
            "Evening medication check",
            "Confirm all evening doses were taken",
            Severity::High,
            "elder-1",
            "Margaret",
            "sarah",
        );
        task.checklist = items;
        task
    }

    #[test]
    fn test_guard_blocks_incomplete_required_items() {
        let task = task_with_checklist(vec![
            ChecklistItem::required("Verify pill organizer"),
            ChecklistItem::optional("Note any side effects"),
        ]);
        let err = ChecklistCompleteGuard
            .check(&task, &QueueEvent::Complete)
            .unwrap_err();
        assert_eq!(
            err,
            StateMachineError::IncompleteChecklist {
                items: vec!["Verify pill organizer".to_string()]
            }
        );
    }

    #[test]
    fn test_guard_ignores_optional_items() {
        let mut task = task_with_checklist(vec![
            ChecklistItem::required("Verify pill organizer"),
            ChecklistItem::optional("Note any side effects"),
        ]);
        task.checklist[0].completed = true;
        assert!(ChecklistCompleteGuard
            .check(&task, &QueueEvent::Complete)
            .is_ok());
    }

    #[test]
    fn test_guard_only_applies_to_complete() {
        let task = task_with_checklist(vec![ChecklistItem::required("Verify pill organizer")]);
        assert!(ChecklistCompleteGuard
            .check(&task, &QueueEvent::Start)
            .is_ok());
    }
}
