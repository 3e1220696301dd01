//! Core state and interaction logic for the task board.
//! This crate is the single source of truth for board invariants.

pub mod config;
pub mod drag;
pub mod form;
pub mod logging;
pub mod model;
pub mod store;
pub mod view;

pub use config::BoardConfig;
pub use drag::gesture::{DragError, DragGesture, DropOutcome, GestureState};
pub use drag::protocol::{is_id_payload, payload_id, DragTarget, Draggable};
pub use drag::transfer::{DataTransfer, DragEvent, DropEffect, TEXT_PLAIN};
pub use form::project_form::{FormError, ProjectForm, ProjectInput, SubmitError};
pub use form::validation::{validate, FieldValue, Validatable};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::work_item::{WorkItem, WorkItemId, WorkItemIdParseError, WorkItemStatus};
pub use store::observable::{Listener, ListenerError, ObservableStore, StoreError, StoreResult};
pub use store::work_item_store::{TransitionOutcome, WorkItemStore};
pub use view::binding::{bind_view, RenderSurface, ViewBinding};
pub use view::project_item::ProjectItem;
pub use view::project_list::{ColumnKind, ProjectList};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
