//! View binding contract.

use crate::model::work_item::WorkItem;
use crate::store::observable::ListenerError;
use crate::store::work_item_store::WorkItemStore;
use std::sync::Arc;

/// A display region that re-renders from store snapshots.
pub trait ViewBinding: Send + Sync {
    /// Receives the full current snapshot after every store mutation.
    fn on_store_update(&self, snapshot: Vec<WorkItem>) -> Result<(), ListenerError>;
}

/// External drawing backend for one region.
pub trait RenderSurface: Send + Sync {
    fn render(&self, region_id: &str, heading: &str, items: &[WorkItem])
        -> Result<(), ListenerError>;
}

/// Subscribes `view` to `store` through a closure that keeps the view alive.
///
/// Returns the same view handle for chaining at construction sites.
pub fn bind_view<V>(store: &WorkItemStore, view: Arc<V>) -> Arc<V>
where
    V: ViewBinding + 'static,
{
    let handler = Arc::clone(&view);
    store.add_listener(move |snapshot| handler.on_store_update(snapshot));
    view
}
