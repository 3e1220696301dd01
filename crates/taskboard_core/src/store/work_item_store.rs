//! Process-wide work item store.
//!
//! # Responsibility
//! - Create work items and apply status transitions.
//! - Guard the single-instance rule behind one accessor.
//!
//! # Invariants
//! - `instance()` is the only creation path outside this crate.
//! - Items keep insertion order; a transition never reorders.
//! - Unknown ids and unchanged statuses are silent no-ops (no notification).

use crate::model::work_item::{WorkItem, WorkItemId, WorkItemStatus};
use crate::store::observable::{ListenerError, ObservableStore, StoreResult};
use log::{debug, info};
use once_cell::sync::OnceCell;

static INSTANCE: OnceCell<WorkItemStore> = OnceCell::new();

/// Result of a `transition` call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Status changed and listeners were notified.
    Applied,
    /// No item with the requested id exists.
    UnknownId,
    /// The item already had the requested status.
    Unchanged,
}

impl TransitionOutcome {
    fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::UnknownId => "unknown_id",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Authoritative holder of all work items for the running process.
pub struct WorkItemStore {
    items: ObservableStore<WorkItem>,
}

impl WorkItemStore {
    /// Returns the process-wide store, creating it on first access.
    pub fn instance() -> &'static WorkItemStore {
        INSTANCE.get_or_init(|| {
            info!("event=store_init module=store status=ok");
            WorkItemStore::new()
        })
    }

    pub(crate) fn new() -> Self {
        Self {
            items: ObservableStore::new(),
        }
    }

    /// Registers a change listener; see `ObservableStore::add_listener`.
    pub fn add_listener<F>(&self, listener: F)
    where
        F: Fn(Vec<WorkItem>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.items.add_listener(listener);
        debug!(
            "event=listener_added module=store status=ok listener_count={}",
            self.items.listener_count()
        );
    }

    /// Appends a new `Active` work item and notifies listeners.
    ///
    /// Inputs are assumed to be validated by the caller.
    ///
    /// # Errors
    /// - Returns `StoreError::Listener` when a listener fails; the item has
    ///   been stored regardless.
    pub fn create(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people_count: u32,
    ) -> StoreResult<WorkItemId> {
        let item = WorkItem::new(title, description, people_count);
        let id = item.id;
        let count = self
            .items
            .update(move |items| {
                items.push(item);
                Some(items.len())
            })?
            .unwrap_or_default();

        info!(
            "event=work_item_created module=store status=ok id={} people_count={} count={}",
            id, people_count, count
        );
        Ok(id)
    }

    /// Moves the item `id` to `new_status`.
    ///
    /// Unknown ids and same-status requests return without notifying.
    ///
    /// # Errors
    /// - Returns `StoreError::Listener` when a listener fails after the
    ///   status was changed.
    pub fn transition(
        &self,
        id: WorkItemId,
        new_status: WorkItemStatus,
    ) -> StoreResult<TransitionOutcome> {
        let mut skipped = TransitionOutcome::UnknownId;
        let applied = self.items.update(|items| {
            let item = items.iter_mut().find(|item| item.id == id)?;
            if item.status == new_status {
                skipped = TransitionOutcome::Unchanged;
                return None;
            }
            item.status = new_status;
            Some(TransitionOutcome::Applied)
        })?;

        let outcome = applied.unwrap_or(skipped);
        match outcome {
            TransitionOutcome::Applied => info!(
                "event=work_item_transition module=store status=ok id={} to={}",
                id,
                new_status.as_str()
            ),
            _ => debug!(
                "event=work_item_transition module=store status=noop reason={} id={} to={}",
                outcome.as_str(),
                id,
                new_status.as_str()
            ),
        }
        Ok(outcome)
    }

    /// Returns an independent copy of all items in insertion order.
    pub fn snapshot(&self) -> Vec<WorkItem> {
        self.items.snapshot()
    }

    /// Returns a copy of one item.
    pub fn find(&self, id: WorkItemId) -> Option<WorkItem> {
        self.items
            .snapshot()
            .into_iter()
            .find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fresh store with process lifetime, for tests that must not share the
/// singleton.
#[cfg(test)]
pub(crate) fn leaked_store() -> &'static WorkItemStore {
    Box::leak(Box::new(WorkItemStore::new()))
}
