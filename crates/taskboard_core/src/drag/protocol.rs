//! Source and target capabilities.
//!
//! Views opt into these independently; there is no shared base type.

use crate::drag::transfer::{DragEvent, TEXT_PLAIN};
use crate::model::work_item::WorkItemId;
use crate::store::observable::StoreResult;
use crate::store::work_item_store::TransitionOutcome;

/// Something that can be picked up by a gesture.
pub trait Draggable {
    /// Writes the payload and declares a move operation.
    fn pick_up(&self, event: &mut DragEvent);

    /// Gesture finished (dropped anywhere or cancelled). Observational only.
    fn release(&self, event: &DragEvent);
}

/// Something a gesture can be dropped onto.
pub trait DragTarget {
    /// Stable id of this target's region.
    fn target_id(&self) -> &str;

    /// Called repeatedly while a payload hovers.
    ///
    /// Claims the drop via `prevent_default` and shows the affordance only
    /// when the payload is a plain-text id; returns whether it claimed.
    fn can_accept(&self, event: &mut DragEvent) -> bool;

    /// Commits a claimed drop. Fires at most once per gesture.
    fn accept(&self, event: &DragEvent) -> StoreResult<TransitionOutcome>;

    /// Payload left without dropping. Clears the affordance only.
    fn reject(&self, event: &DragEvent);
}

/// Whether the first declared payload format is the plain-text id format.
pub fn is_id_payload(event: &DragEvent) -> bool {
    event.transfer().types().first() == Some(&TEXT_PLAIN)
}

/// Extracts the dragged work item id.
///
/// Returns `None` for a missing or unparsable payload; callers treat that
/// like an unknown id.
pub fn payload_id(event: &DragEvent) -> Option<WorkItemId> {
    event.transfer().get_data(TEXT_PLAIN)?.parse().ok()
}
