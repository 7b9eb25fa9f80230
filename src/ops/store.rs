use tracing::{debug, info};

use crate::model::{Hierarchy, IdGenerator, ItemId, SubId};

use super::hierarchy_ops::{self, Change, StoreError};

/// Receives the full hierarchy after every applied mutation
pub trait ChangeSink {
    fn state_changed(&mut self, hierarchy: &Hierarchy);
}

/// Sink that drops notifications
pub struct NullSink;

impl ChangeSink for NullSink {
    fn state_changed(&mut self, _hierarchy: &Hierarchy) {}
}

/// Owns the hierarchy and is the only path through which it changes.
///
/// Each public mutation either fails (hierarchy untouched, no
/// notification) or completes and then notifies the sink exactly once if
/// anything changed.
pub struct HierarchyStore {
    hierarchy: Hierarchy,
    ids: IdGenerator,
    sink: Box<dyn ChangeSink>,
}

impl HierarchyStore {
    pub fn new(hierarchy: Hierarchy, sink: Box<dyn ChangeSink>) -> Self {
        Self::with_ids(hierarchy, sink, IdGenerator::new())
    }

    pub fn with_ids(hierarchy: Hierarchy, sink: Box<dyn ChangeSink>, mut ids: IdGenerator) -> Self {
        ids.observe(hierarchy.all_tokens());
        HierarchyStore {
            hierarchy,
            ids,
            sink,
        }
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Replace the hierarchy with one loaded from outside (another process
    /// wrote the store). Does not notify: the data came from storage.
    pub fn reload(&mut self, hierarchy: Hierarchy) {
        self.ids.observe(hierarchy.all_tokens());
        info!(items = hierarchy.items.len(), "hierarchy reloaded from storage");
        self.hierarchy = hierarchy;
    }

    pub fn add_item(&mut self, text: &str) -> Result<ItemId, StoreError> {
        let id = ItemId::new(self.ids.next_token());
        let result = hierarchy_ops::add_item(&mut self.hierarchy, id.clone(), text);
        self.finish("add_item", result)?;
        Ok(id)
    }

    pub fn add_sub(&mut self, item_id: &ItemId, text: &str) -> Result<SubId, StoreError> {
        let id = SubId::new(self.ids.next_token());
        let result = hierarchy_ops::add_sub(&mut self.hierarchy, item_id, id.clone(), text);
        self.finish("add_sub", result)?;
        Ok(id)
    }

    pub fn toggle_item_done(&mut self, item_id: &ItemId) -> Result<Change, StoreError> {
        let result = hierarchy_ops::toggle_item_done(&mut self.hierarchy, item_id);
        self.finish("toggle_item_done", result)
    }

    pub fn toggle_sub_done(&mut self, item_id: &ItemId, sub_id: &SubId) -> Result<Change, StoreError> {
        let result = hierarchy_ops::toggle_sub_done(&mut self.hierarchy, item_id, sub_id);
        self.finish("toggle_sub_done", result)
    }

    pub fn delete_item(&mut self, item_id: &ItemId) -> Result<Change, StoreError> {
        let result = hierarchy_ops::delete_item(&mut self.hierarchy, item_id);
        self.finish("delete_item", result)
    }

    pub fn delete_sub(&mut self, item_id: &ItemId, sub_id: &SubId) -> Result<Change, StoreError> {
        let result = hierarchy_ops::delete_sub(&mut self.hierarchy, item_id, sub_id);
        self.finish("delete_sub", result)
    }

    pub fn reorder_item(&mut self, item_id: &ItemId, target_id: &ItemId) -> Result<Change, StoreError> {
        let result = hierarchy_ops::reorder_item(&mut self.hierarchy, item_id, target_id);
        self.finish("reorder_item", result)
    }

    pub fn reparent_sub(
        &mut self,
        sub_id: &SubId,
        from_id: &ItemId,
        to_id: &ItemId,
    ) -> Result<Change, StoreError> {
        let result = hierarchy_ops::reparent_sub(&mut self.hierarchy, sub_id, from_id, to_id);
        self.finish("reparent_sub", result)
    }

    fn finish(&mut self, op: &str, result: Result<Change, StoreError>) -> Result<Change, StoreError> {
        match &result {
            Ok(Change::Applied) => {
                debug!(op, "mutation applied");
                self.sink.state_changed(&self.hierarchy);
            }
            Ok(Change::Unchanged) => debug!(op, "mutation was a no-op"),
            Err(e) => debug!(op, error = %e, "mutation rejected"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Records a snapshot per notification
    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Hierarchy>>>);

    impl ChangeSink for Recorder {
        fn state_changed(&mut self, hierarchy: &Hierarchy) {
            self.0.borrow_mut().push(hierarchy.clone());
        }
    }

    fn store_with_recorder() -> (HierarchyStore, Recorder) {
        let rec = Recorder::default();
        let store = HierarchyStore::with_ids(
            Hierarchy::default(),
            Box::new(rec.clone()),
            IdGenerator::with_seed(11),
        );
        (store, rec)
    }

    #[test]
    fn one_notification_per_applied_mutation() {
        let (mut store, rec) = store_with_recorder();
        let a = store.add_item("first").unwrap();
        let b = store.add_item("second").unwrap();
        store.add_sub(&a, "child").unwrap();
        store.reorder_item(&b, &a).unwrap();
        assert_eq!(rec.0.borrow().len(), 4);
        // Snapshot reflects the completed mutation
        let last = rec.0.borrow().last().cloned().unwrap();
        assert_eq!(last.items[0].id, b);
    }

    #[test]
    fn errors_and_no_ops_do_not_notify() {
        let (mut store, rec) = store_with_recorder();
        let a = store.add_item("first").unwrap();
        let sub = store.add_sub(&a, "child").unwrap();
        let before = rec.0.borrow().len();

        assert!(store.delete_item(&ItemId::new("missing")).is_err());
        assert!(store.add_sub(&a, "   ").is_err());
        assert_eq!(store.reorder_item(&a, &a), Ok(Change::Unchanged));
        assert_eq!(store.reparent_sub(&sub, &a, &a), Ok(Change::Unchanged));

        assert_eq!(rec.0.borrow().len(), before);
    }

    #[test]
    fn failed_add_does_not_leave_partial_state() {
        let (mut store, _rec) = store_with_recorder();
        let before = store.hierarchy().clone();
        assert!(store.add_item("").is_err());
        assert_eq!(store.hierarchy(), &before);
    }

    #[test]
    fn generated_ids_do_not_collide_with_loaded_ones() {
        let mut h = Hierarchy::default();
        hierarchy_ops::add_item(&mut h, ItemId::new("x"), "loaded").unwrap();
        let mut store = HierarchyStore::new(h, Box::new(NullSink));
        let id = store.add_item("fresh").unwrap();
        assert_ne!(id.as_str(), "x");
        assert_eq!(store.hierarchy().items.len(), 2);
    }

    #[test]
    fn reload_replaces_without_notifying() {
        let (mut store, rec) = store_with_recorder();
        let mut other = Hierarchy::default();
        hierarchy_ops::add_item(&mut other, ItemId::new("ext"), "from elsewhere").unwrap();
        store.reload(other.clone());
        assert_eq!(store.hierarchy(), &other);
        assert!(rec.0.borrow().is_empty());
    }
}
