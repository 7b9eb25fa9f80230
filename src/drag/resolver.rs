use tracing::{info, warn};

use crate::model::{ItemId, SubId};
use crate::ops::{Change, HierarchyStore, StoreError};

use super::session::{DragKind, DragSession, DropRequest};
use super::target::DropTarget;

/// The store mutation a drop maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    /// Move `item` to just before `before`
    Reorder { item: ItemId, before: ItemId },
    /// Move `sub` from `from` to the end of `to`
    Reparent { sub: SubId, from: ItemId, to: ItemId },
}

/// Decide what a drop means. `None` is a valid no-op: no session, no
/// usable target, self-drop, or an item dropped on a sub-list.
pub fn resolve(session: Option<&DragSession>, target: Option<&DropTarget>) -> Option<DropAction> {
    let session = session?;
    let target = target?;

    match session.kind() {
        DragKind::Sub => {
            let (sub, parent) = (session.sub_id()?, session.parent_id()?);
            let dest = match target {
                DropTarget::ItemRow(row_id) => row_id,
                DropTarget::SubList(owner) => owner,
            };
            if dest == parent {
                return None;
            }
            Some(DropAction::Reparent {
                sub: sub.clone(),
                from: parent.clone(),
                to: dest.clone(),
            })
        }
        DragKind::Item => match target {
            DropTarget::ItemRow(target_id) if target_id.as_str() != session.id() => {
                Some(DropAction::Reorder {
                    item: session.source.item_id().clone(),
                    before: target_id.clone(),
                })
            }
            _ => None,
        },
    }
}

/// Apply a resolved action. Identities are looked up in the store's
/// current hierarchy, so a stale session fails with `NotFound` and
/// changes nothing.
pub fn apply(store: &mut HierarchyStore, action: &DropAction) -> Result<Change, StoreError> {
    match action {
        DropAction::Reorder { item, before } => store.reorder_item(item, before),
        DropAction::Reparent { sub, from, to } => store.reparent_sub(sub, from, to),
    }
}

/// Resolve and apply a committed drop
pub fn commit(store: &mut HierarchyStore, request: &DropRequest) -> Result<Change, StoreError> {
    let Some(action) = resolve(Some(&request.session), request.target.as_ref()) else {
        return Ok(Change::Unchanged);
    };
    match apply(store, &action) {
        Ok(change) => {
            info!(?action, ?change, "drop applied");
            Ok(change)
        }
        Err(e) => {
            warn!(?action, error = %e, "drop rejected");
            Err(e)
        }
    }
}
