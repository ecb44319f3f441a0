//! Append-only timeline ledger.
//!
//! Entries are kept in insertion order behind one lock. Appending an id
//! that already exists is rejected rather than merged; nothing is ever
//! updated or removed outside of the test-isolation `clear`.

use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::debug;

use crate::error::StoreError;
use crate::models::TimelineEntry;

#[derive(Debug, Default)]
pub struct TimelineStore {
    inner: RwLock<TimelineInner>,
}

#[derive(Debug, Default)]
struct TimelineInner {
    entries: Vec<TimelineEntry>,
    ids: HashSet<String>,
}

impl TimelineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, rejecting duplicate ids.
    pub fn append(&self, entry: TimelineEntry) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if !inner.ids.insert(entry.id.clone()) {
            return Err(StoreError::DuplicateEntry {
                id: entry.id.clone(),
            });
        }
        debug!(entry_id = %entry.id, event_type = %entry.event_type, "timeline entry appended");
        inner.entries.push(entry);
        Ok(())
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> Vec<TimelineEntry> {
        self.inner.read().entries.clone()
    }

    /// Entries for one elder, insertion order preserved.
    pub fn entries_for_elder(&self, elder_id: &str) -> Vec<TimelineEntry> {
        self.inner
            .read()
            .entries
            .iter()
            .filter(|e| e.elder_id == elder_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Drop all entries. Test isolation hook.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.entries.clear();
        inner.ids.clear();
    }
}
