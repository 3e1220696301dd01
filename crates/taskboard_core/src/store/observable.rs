//! Generic observable collection.
//!
//! # Responsibility
//! - Hold an ordered collection and a list of change listeners.
//! - Serialize mutate+notify so no listener observes a partial mutation.
//!
//! # Invariants
//! - Insertion order of listeners is notification order.
//! - Each listener gets its own clone of the collection.
//! - A listener registered during a notification round is not called for
//!   that round.
//! - The first failing listener aborts the round and its error is returned
//!   to the mutating caller. The mutation itself stays applied.
//!
//! Listeners must not call back into a mutating operation of the same store;
//! the mutation gate is not reentrant.

use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Change callback registered on an observable store.
pub type Listener<T> = Arc<dyn Fn(Vec<T>) -> Result<(), ListenerError> + Send + Sync>;

/// Failure reported by a listener (a defect in the consuming view).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ListenerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ListenerError {}

/// Store-level error surfaced from mutating operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Listener at `index` (registration order) failed during notification.
    Listener { index: usize, source: ListenerError },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listener { index, source } => {
                write!(f, "store listener #{index} failed: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Listener { source, .. } => Some(source),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Ordered collection with synchronous change notification.
pub struct ObservableStore<T> {
    items: Mutex<Vec<T>>,
    listeners: Mutex<Vec<Listener<T>>>,
    mutation_gate: Mutex<()>,
}

impl<T> Default for ObservableStore<T> {
    fn default() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            listeners: Mutex::new(Vec::new()),
            mutation_gate: Mutex::new(()),
        }
    }
}

impl<T: Clone> ObservableStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for every future mutation.
    ///
    /// The listener is not invoked with the current state. There is no
    /// unregister operation; listeners live as long as the store.
    pub fn add_listener<F>(&self, listener: F)
    where
        F: Fn(Vec<T>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        lock(&self.listeners).push(Arc::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    /// Returns an independent copy of the current collection.
    pub fn snapshot(&self) -> Vec<T> {
        lock(&self.items).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.items).is_empty()
    }

    /// Applies `mutate` to the collection and notifies listeners.
    ///
    /// `mutate` returns `None` when it made no change; in that case no
    /// listener is called and `Ok(None)` is returned. Otherwise every
    /// listener runs before this call returns.
    ///
    /// # Errors
    /// - Returns `StoreError::Listener` for the first listener that fails.
    pub fn update<R>(
        &self,
        mutate: impl FnOnce(&mut Vec<T>) -> Option<R>,
    ) -> StoreResult<Option<R>> {
        let _gate = lock(&self.mutation_gate);

        let (outcome, snapshot) = {
            let mut items = lock(&self.items);
            match mutate(&mut *items) {
                Some(outcome) => (outcome, items.clone()),
                None => return Ok(None),
            }
        };

        self.notify(snapshot)?;
        Ok(Some(outcome))
    }

    fn notify(&self, snapshot: Vec<T>) -> StoreResult<()> {
        // Cloned so listeners registered mid-round miss this round.
        let listeners = lock(&self.listeners).clone();
        for (index, listener) in listeners.iter().enumerate() {
            if let Err(source) = listener(snapshot.clone()) {
                error!(
                    "event=listener_failed module=store status=error listener_index={} listener_count={}",
                    index,
                    listeners.len()
                );
                return Err(StoreError::Listener { index, source });
            }
        }
        Ok(())
    }
}

// Mutations run to completion before notification, so the collection is
// consistent even if a listener panicked while a guard was alive.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::{ListenerError, ObservableStore, StoreError};
    use std::sync::{Arc, Mutex};

    fn push(store: &ObservableStore<u32>, value: u32) {
        store
            .update(|items| {
                items.push(value);
                Some(())
            })
            .expect("push should notify");
    }

    #[test]
    fn add_listener_does_not_replay_current_state() {
        let store = ObservableStore::<u32>::new();
        push(&store, 1);

        let calls = Arc::new(Mutex::new(0));
        let seen = Arc::clone(&calls);
        store.add_listener(move |_| {
            *seen.lock().unwrap() += 1;
            Ok(())
        });

        assert_eq!(*calls.lock().unwrap(), 0);
        push(&store, 2);
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let store = ObservableStore::<u32>::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            store.add_listener(move |_| {
                order.lock().unwrap().push(tag);
                Ok(())
            });
        }

        push(&store, 7);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn no_change_skips_notification() {
        let store = ObservableStore::<u32>::new();
        let calls = Arc::new(Mutex::new(0));
        let seen = Arc::clone(&calls);
        store.add_listener(move |_| {
            *seen.lock().unwrap() += 1;
            Ok(())
        });

        let outcome = store.update(|_| None::<()>).expect("no-op update");
        assert!(outcome.is_none());
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn snapshot_mutation_does_not_leak_into_store_or_other_listeners() {
        let store = ObservableStore::<u32>::new();
        store.add_listener(|mut snapshot| {
            snapshot.clear();
            snapshot.push(999);
            Ok(())
        });
        let second_seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&second_seen);
        store.add_listener(move |snapshot| {
            *sink.lock().unwrap() = snapshot;
            Ok(())
        });

        push(&store, 1);
        assert_eq!(store.snapshot(), vec![1]);
        assert_eq!(*second_seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn failing_listener_stops_round_and_keeps_mutation() {
        let store = ObservableStore::<u32>::new();
        store.add_listener(|_| Err(ListenerError::new("render failed")));
        let later_calls = Arc::new(Mutex::new(0));
        let seen = Arc::clone(&later_calls);
        store.add_listener(move |_| {
            *seen.lock().unwrap() += 1;
            Ok(())
        });

        let err = store
            .update(|items| {
                items.push(5);
                Some(())
            })
            .expect_err("listener failure must propagate");
        assert_eq!(
            err,
            StoreError::Listener {
                index: 0,
                source: ListenerError::new("render failed"),
            }
        );
        assert_eq!(*later_calls.lock().unwrap(), 0);
        assert_eq!(store.snapshot(), vec![5]);
    }

    #[test]
    fn listener_added_during_round_waits_for_next_round() {
        let store = Arc::new(ObservableStore::<u32>::new());
        let late_calls = Arc::new(Mutex::new(0));

        let registrar = Arc::clone(&store);
        let late = Arc::clone(&late_calls);
        let registered = Arc::new(Mutex::new(false));
        store.add_listener(move |_| {
            let mut done = registered.lock().unwrap();
            if !*done {
                *done = true;
                let late = Arc::clone(&late);
                registrar.add_listener(move |_| {
                    *late.lock().unwrap() += 1;
                    Ok(())
                });
            }
            Ok(())
        });

        push(&store, 1);
        assert_eq!(*late_calls.lock().unwrap(), 0);
        push(&store, 2);
        assert_eq!(*late_calls.lock().unwrap(), 1);
    }
}
