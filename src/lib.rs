#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

//! # CareOps Core
//!
//! Decision engine for coordinating family-based elder care.
//!
//! ## Overview
//!
//! Heterogeneous signals about an elder's wellbeing (device alerts, care
//! tasks, medication events, check-ins) are normalized into a single
//! priority-ordered work queue. Every queue item moves through an explicit
//! lifecycle state machine, emergencies run through structured triage
//! protocols, stalled work escalates down a ranked chain of family members,
//! and completed work is captured with validated outcomes that can spawn
//! follow-up tasks. Every state change lands on an append-only timeline.
//!
//! ## Module Organization
//!
//! - [`models`] - Plain data types: queue items, alerts, tasks, family members
//! - [`state_machine`] - Queue item lifecycle states, events, guards
//! - [`priority`] - Additive priority scoring for the unified queue
//! - [`triage`] - Four-step emergency triage protocols and 911 call scripts
//! - [`assignment`] - Weighted candidate scoring and escalation chains
//! - [`outcome`] - Outcome capture validation and follow-up generation
//! - [`store`] - In-memory queue and timeline stores
//! - [`coordinator`] - Facade tying ingestion, transitions, and escalation together
//! - [`config`] - Tunable scoring weights and escalation timeouts
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use careops_core::config::{AssignmentWeights, EscalationTimeouts};
//! use careops_core::Coordinator;
//!
//! let weights = AssignmentWeights::default();
//! assert!(weights.validate().is_ok());
//!
//! let timeouts = EscalationTimeouts::default();
//! assert_eq!(timeouts.urgent_minutes, 15);
//!
//! let engine = Coordinator::new(weights, timeouts).unwrap();
//! assert!(engine.queue.is_empty());
//! ```

pub mod assignment;
pub mod config;
pub mod constants;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod models;
pub mod outcome;
pub mod priority;
pub mod state_machine;
pub mod store;
pub mod triage;

pub use config::{AssignmentWeights, EscalationTimeouts};
pub use coordinator::Coordinator;
pub use error::{CareOpsError, OutcomeError, Result, StoreError, TriageError};
pub use models::{
    Alert, AlertType, Availability, ChecklistItem, EvidenceRef, FamilyMember, FamilyRole,
    FollowUpSpec, QueueItem, QueueItemKind, Severity, Task, TimelineEntry,
};
pub use state_machine::{QueueEvent, QueueState, StateMachineError};
