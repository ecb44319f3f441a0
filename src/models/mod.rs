//! Data model for the care operations engine.
//!
//! Heterogeneous inbound records (alerts, tasks, medication events,
//! check-ins) are normalized into the unified [`QueueItem`] shape via pure
//! per-variant conversion functions rather than subclassing. Everything here
//! is plain data: decision logic lives in the sibling modules.

pub mod alert;
pub mod family_member;
pub mod outcome;
pub mod queue_item;
pub mod task;
pub mod timeline;

pub use alert::{Alert, AlertType};
pub use family_member::{Availability, FamilyMember, FamilyRole, PerformanceHistory};
pub use outcome::{EvidenceRef, FollowUpSpec, OutcomeResult};
pub use queue_item::{QueueItem, QueueItemKind, Severity};
pub use task::{ChecklistItem, Task};
pub use timeline::TimelineEntry;
