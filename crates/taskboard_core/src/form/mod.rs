//! Project input form.
//!
//! # Responsibility
//! - Turn raw user input into a validated `ProjectInput`.
//! - Hand validated input to the work item store.
//!
//! # Invariants
//! - Input is rejected when ANY field is invalid.
//! - The store is never called with unvalidated input.

pub mod project_form;
pub mod validation;
