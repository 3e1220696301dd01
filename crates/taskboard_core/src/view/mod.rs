//! Board views bound to the work item store.
//!
//! # Responsibility
//! - Define the contract every rendering surface implements.
//! - Provide the column and card components of the board.
//!
//! # Invariants
//! - Views filter snapshots themselves; the store knows nothing of views.
//! - Each view subscribes once, at construction, and never unsubscribes.
//! - Actual drawing is delegated to an external `RenderSurface`.

pub mod binding;
pub mod project_item;
pub mod project_list;
