//! In-memory queue store.
//!
//! Items are keyed by id in a concurrent map. Mutating operations go
//! through the map's per-entry locking, so at most one transition is in
//! flight per item id; reads work on cloned snapshots.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use crate::error::{CareOpsError, StoreError};
use crate::models::QueueItem;
use crate::priority::reprioritize;
use crate::state_machine::{apply_queue_event, QueueEvent, QueueState};

#[derive(Debug, Default)]
pub struct QueueStore {
    items: DashMap<String, QueueItem>,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item.
    pub fn upsert(&self, item: QueueItem) {
        debug!(item_id = %item.id, status = %item.status, "queue item stored");
        self.items.insert(item.id.clone(), item);
    }

    pub fn get(&self, id: &str) -> Option<QueueItem> {
        self.items.get(id).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply a lifecycle event to one item while holding its entry lock.
    /// The stored item is untouched when the transition is rejected.
    pub fn transition(
        &self,
        id: &str,
        event: &QueueEvent,
        now: DateTime<Utc>,
    ) -> Result<QueueState, CareOpsError> {
        let mut entry = self
            .items
            .get_mut(id)
            .ok_or(StoreError::UnknownItem { id: id.to_string() })?;
        let state = apply_queue_event(entry.value_mut(), event, now)?;
        if matches!(event, QueueEvent::Escalate) {
            entry.escalation_level += 1;
        }
        reprioritize(entry.value_mut(), now);
        Ok(state)
    }

    /// Assign or unassign an item and recompute its priority.
    pub fn assign(
        &self,
        id: &str,
        assignee: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), CareOpsError> {
        let mut entry = self
            .items
            .get_mut(id)
            .ok_or(StoreError::UnknownItem { id: id.to_string() })?;
        entry.assigned_to = assignee;
        reprioritize(entry.value_mut(), now);
        Ok(())
    }

    /// Recompute every stored item's priority against `now`.
    pub fn reprioritize_all(&self, now: DateTime<Utc>) {
        for mut entry in self.items.iter_mut() {
            reprioritize(entry.value_mut(), now);
        }
    }

    /// Snapshot of all items, highest priority first; ties break by id so
    /// the ordering is stable.
    pub fn sorted_snapshot(&self) -> Vec<QueueItem> {
        let mut items: Vec<QueueItem> = self.items.iter().map(|e| e.clone()).collect();
        items.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
        items
    }

    /// Items still needing attention (everything except completed).
    pub fn open_items(&self) -> Vec<QueueItem> {
        self.sorted_snapshot()
            .into_iter()
            .filter(|item| !item.status.is_terminal())
            .collect()
    }

    /// Drop all items. Test isolation hook.
    pub fn clear(&self) {
        self.items.clear();
    }
}
