//! Lifecycle state machine for queue items and tasks.
//!
//! States and events are plain enums, the legal transition set lives in a
//! const table, and guards veto transitions with typed errors. All
//! transition application is table-driven and leaves the entity untouched
//! on rejection.

pub mod errors;
pub mod events;
pub mod guards;
pub mod queue_state_machine;
pub mod states;

pub use errors::StateMachineError;
pub use events::QueueEvent;
pub use guards::{ChecklistCompleteGuard, StateGuard};
pub use queue_state_machine::{
    apply_queue_event, apply_task_event, determine_target_state, validate_transition,
};
pub use states::QueueState;
