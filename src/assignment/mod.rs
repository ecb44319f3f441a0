//! Assignment scoring and escalation chaining.

pub mod engine;
pub mod escalation;
pub mod scoring;

pub use engine::{
    calculate_best_assignee, rank_candidates, AssignmentContext, AssignmentRecommendation,
    CandidateScore,
};
pub use escalation::{
    build_escalation_plan, item_should_escalate, should_escalate, EscalationPlan,
    EscalationUrgency,
};
