//! Crate-level error taxonomy.
//!
//! Recoverable failures (illegal transitions, unmet preconditions, invalid
//! input, duplicate timeline writes) are returned as `Err` values carrying the
//! specific detail the caller needs to report. The one documented fatal case,
//! an empty candidate pool handed to the assignment engine, panics instead:
//! it signals a misconfigured caller rather than a runtime condition.

use crate::state_machine::StateMachineError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CareOpsError {
    #[error(transparent)]
    StateTransition(#[from] StateMachineError),

    #[error("Triage error: {0}")]
    Triage(#[from] TriageError),

    #[error("Outcome error: {0}")]
    Outcome(#[from] OutcomeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors raised by the triage protocol state machine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriageError {
    /// Required questions in the current step are unanswered. Carries the
    /// question ids so the caller can prompt for exactly what is missing.
    #[error("missing required response for: {}", question_ids.join(", "))]
    MissingResponses { question_ids: Vec<String> },

    #[error("unknown protocol step {step}")]
    UnknownStep { step: u8 },
}

/// Errors raised by outcome capture and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OutcomeError {
    /// The supplied outcome string is not in the category's closed list.
    #[error("invalid outcome '{outcome}' for category '{category}'")]
    InvalidOutcome { outcome: String, category: String },
}

/// Errors raised by the in-memory stores.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Timeline entries are append-only; re-adding an existing id is rejected,
    /// never merged.
    #[error("duplicate timeline entry id: {id}")]
    DuplicateEntry { id: String },

    #[error("unknown item id: {id}")]
    UnknownItem { id: String },
}

pub type Result<T> = std::result::Result<T, CareOpsError>;
