//! Drag-and-drop protocol turning pointer gestures into status transitions.
//!
//! # Responsibility
//! - Define the source/target capability traits.
//! - Carry the transfer payload between source and target.
//! - Drive one gesture through `Idle -> Hovering -> Committed | Idle`.
//!
//! # Invariants
//! - The payload is a single `text/plain` work item id.
//! - Targets only request transitions; they never mutate items.
//! - A gesture commits at most once.

pub mod gesture;
pub mod protocol;
pub mod transfer;
