//! Structured outcome capture with automatic follow-up generation.

pub mod capture;
pub mod templates;

pub use capture::{
    capture_outcome, generate_follow_up_tasks, outcome_timeline_entry, CapturedOutcome,
};
pub use templates::{template_for, EvidenceKind, OutcomeCategory, OutcomeOption, OutcomeTemplate};
