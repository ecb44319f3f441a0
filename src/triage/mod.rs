//! Four-step emergency triage protocols.
//!
//! Templates are const data; the protocol state machine walks them against
//! recorded responses and emits a deterministic action plan. Emergency
//! routing also produces a dispatcher call script.

pub mod call_script;
pub mod protocol;
pub mod templates;

pub use call_script::{generate_call_script, CallScript, EmergencyCallRequest};
pub use protocol::{ActionPlan, ActionRecommendation, TriageProtocol};
pub use templates::{
    template_for, ProtocolTemplate, ProtocolType, Question, QuestionKind, ResponseValue, Step,
    StepOutcome,
};
