use thiserror::Error;

use super::states::QueueState;

/// Errors raised while validating or applying a transition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateMachineError {
    #[error("illegal transition from '{from}' to '{to}'")]
    IllegalTransition { from: QueueState, to: QueueState },

    #[error("cannot complete with incomplete required checklist items: {}", items.join(", "))]
    IncompleteChecklist { items: Vec<String> },

    #[error("snooze time must be in the future")]
    SnoozeTimeInPast,
}
