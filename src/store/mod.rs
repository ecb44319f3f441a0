//! Process-wide in-memory stores for the queue and the timeline ledger.

pub mod queue_store;
pub mod timeline_store;

pub use queue_store::QueueStore;
pub use timeline_store::TimelineStore;
