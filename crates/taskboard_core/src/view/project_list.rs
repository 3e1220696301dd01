//! Board column.
//!
//! # Responsibility
//! - Render the subset of work items whose status matches the column.
//! - Act as a drop target that moves items into the column's status.
//!
//! # Invariants
//! - `rendered()` only ever holds items with the column's status.
//! - The highlight is on exactly while a claimed payload hovers.
//! - Drops request `transition`; the column never edits items itself.

use crate::drag::protocol::{is_id_payload, payload_id, DragTarget};
use crate::drag::transfer::DragEvent;
use crate::model::work_item::{WorkItem, WorkItemStatus};
use crate::store::observable::{ListenerError, StoreResult};
use crate::store::work_item_store::{TransitionOutcome, WorkItemStore};
use crate::view::binding::{bind_view, RenderSurface, ViewBinding};
use crate::view::project_item::ProjectItem;
use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Fixed column configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Active,
    Finished,
}

impl ColumnKind {
    pub const ALL: [ColumnKind; 2] = [ColumnKind::Active, ColumnKind::Finished];

    /// Status that items dropped here transition to.
    pub fn status(self) -> WorkItemStatus {
        match self {
            Self::Active => WorkItemStatus::Active,
            Self::Finished => WorkItemStatus::Finished,
        }
    }

    pub fn region_id(self) -> &'static str {
        match self {
            Self::Active => "active-projects-list",
            Self::Finished => "finished-projects-list",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE PROJECTS",
            Self::Finished => "FINISHED PROJECTS",
        }
    }
}

/// One board column subscribed to the work item store.
pub struct ProjectList {
    kind: ColumnKind,
    store: &'static WorkItemStore,
    rendered: Mutex<Vec<WorkItem>>,
    highlighted: AtomicBool,
    surface: Option<Arc<dyn RenderSurface>>,
}

impl ProjectList {
    /// Creates the column, subscribes it, and renders the current state.
    ///
    /// # Errors
    /// - Returns the initial render failure, if any. The subscription stays.
    pub fn mount(
        kind: ColumnKind,
        store: &'static WorkItemStore,
    ) -> Result<Arc<Self>, ListenerError> {
        Self::mount_inner(kind, store, None)
    }

    /// Same as `mount`, drawing through `surface` on every update.
    pub fn mount_with_surface(
        kind: ColumnKind,
        store: &'static WorkItemStore,
        surface: Arc<dyn RenderSurface>,
    ) -> Result<Arc<Self>, ListenerError> {
        Self::mount_inner(kind, store, Some(surface))
    }

    fn mount_inner(
        kind: ColumnKind,
        store: &'static WorkItemStore,
        surface: Option<Arc<dyn RenderSurface>>,
    ) -> Result<Arc<Self>, ListenerError> {
        let list = bind_view(
            store,
            Arc::new(Self {
                kind,
                store,
                rendered: Mutex::new(Vec::new()),
                highlighted: AtomicBool::new(false),
                surface,
            }),
        );
        debug!(
            "event=view_mounted module=view status=ok region={}",
            kind.region_id()
        );
        list.on_store_update(store.snapshot())?;
        Ok(list)
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn heading(&self) -> &'static str {
        self.kind.heading()
    }

    pub fn region_id(&self) -> &'static str {
        self.kind.region_id()
    }

    /// Items currently shown, in store order.
    pub fn rendered(&self) -> Vec<WorkItem> {
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn cards(&self) -> Vec<ProjectItem> {
        self.rendered().into_iter().map(ProjectItem::new).collect()
    }

    /// Card whose title equals `key` or whose id starts with `key`.
    pub fn card(&self, key: &str) -> Option<ProjectItem> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        self.cards().into_iter().find(|card| {
            let item = card.item();
            item.title == key || item.id.to_string().starts_with(key)
        })
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted.load(Ordering::SeqCst)
    }

    /// Plain-text rendering of the column.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![self.heading().to_string()];
        let cards = self.cards();
        if cards.is_empty() {
            lines.push("  (empty)".to_string());
        }
        for card in cards {
            let item = card.item();
            lines.push(format!(
                "  [{}] {} ({}) - {}",
                item.id,
                item.title,
                card.persons_label(),
                item.description
            ));
        }
        lines
    }
}

impl ViewBinding for ProjectList {
    fn on_store_update(&self, snapshot: Vec<WorkItem>) -> Result<(), ListenerError> {
        let status = self.kind.status();
        let subset: Vec<WorkItem> = snapshot
            .into_iter()
            .filter(|item| item.status == status)
            .collect();

        if let Some(surface) = &self.surface {
            surface.render(self.region_id(), self.heading(), &subset)?;
        }
        debug!(
            "event=view_rendered module=view status=ok region={} count={}",
            self.region_id(),
            subset.len()
        );
        *self.rendered.lock().unwrap_or_else(PoisonError::into_inner) = subset;
        Ok(())
    }
}

impl DragTarget for ProjectList {
    fn target_id(&self) -> &str {
        self.region_id()
    }

    fn can_accept(&self, event: &mut DragEvent) -> bool {
        if !is_id_payload(event) {
            return false;
        }
        event.prevent_default();
        self.highlighted.store(true, Ordering::SeqCst);
        true
    }

    fn accept(&self, event: &DragEvent) -> StoreResult<TransitionOutcome> {
        self.highlighted.store(false, Ordering::SeqCst);
        let Some(id) = payload_id(event) else {
            warn!(
                "event=drop_payload_invalid module=drag status=noop region={}",
                self.region_id()
            );
            return Ok(TransitionOutcome::UnknownId);
        };
        self.store.transition(id, self.kind.status())
    }

    fn reject(&self, _event: &DragEvent) {
        self.highlighted.store(false, Ordering::SeqCst);
    }
}
