//! In-memory state containers and change notification.
//!
//! # Responsibility
//! - Own the only authoritative copy of board state.
//! - Fan every successful mutation out to registered listeners.
//!
//! # Invariants
//! - Listeners are invoked synchronously, in registration order, before the
//!   mutating call returns.
//! - Listeners receive independent snapshots, never the live collection.
//! - There is exactly one `WorkItemStore` per process.

pub mod observable;
pub mod work_item_store;
