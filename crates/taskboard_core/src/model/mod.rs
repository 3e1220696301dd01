//! Work item domain model.
//!
//! # Responsibility
//! - Define the canonical record rendered by every board column.
//! - Keep identity and status semantics in one place.
//!
//! # Invariants
//! - Every work item is identified by a stable `WorkItemId`.
//! - Status is one of the two board columns; there is no deleted state.

pub mod work_item;
