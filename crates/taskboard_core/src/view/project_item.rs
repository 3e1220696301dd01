//! Board card for one work item.

use crate::drag::protocol::Draggable;
use crate::drag::transfer::{DragEvent, DropEffect, TEXT_PLAIN};
use crate::model::work_item::WorkItem;
use log::debug;

/// Draggable card rendered inside a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    item: WorkItem,
}

impl ProjectItem {
    pub fn new(item: WorkItem) -> Self {
        Self { item }
    }

    pub fn item(&self) -> &WorkItem {
        &self.item
    }

    /// Assignment line shown under the title.
    pub fn persons_label(&self) -> String {
        match self.item.people_count {
            1 => "1 person assigned".to_string(),
            count => format!("{count} persons assigned"),
        }
    }
}

impl Draggable for ProjectItem {
    fn pick_up(&self, event: &mut DragEvent) {
        let transfer = event.transfer_mut();
        transfer.set_data(TEXT_PLAIN, self.item.id.to_string());
        transfer.effect_allowed = DropEffect::Move;
        debug!(
            "event=drag_start module=drag status=ok id={}",
            self.item.id
        );
    }

    fn release(&self, event: &DragEvent) {
        debug!(
            "event=drag_end module=drag status=ok id={} claimed={}",
            self.item.id,
            event.default_prevented()
        );
    }
}
