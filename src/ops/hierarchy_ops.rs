use crate::model::{Hierarchy, Item, ItemId, SubId, SubItem};

/// Error type for hierarchy operations. The hierarchy is untouched
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// What a successful operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Applied,
    /// Valid request that leaves the hierarchy as it was (self-drop etc.)
    Unchanged,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

pub fn toggle_item_done(h: &mut Hierarchy, item_id: &ItemId) -> Result<Change, StoreError> {
    let item = find_item_mut(h, item_id)?;
    item.done = !item.done;
    Ok(Change::Applied)
}

pub fn toggle_sub_done(
    h: &mut Hierarchy,
    item_id: &ItemId,
    sub_id: &SubId,
) -> Result<Change, StoreError> {
    let item = find_item_mut(h, item_id)?;
    let sub = item
        .sub_mut(sub_id)
        .ok_or_else(|| sub_not_found(sub_id, item_id))?;
    sub.done = !sub.done;
    Ok(Change::Applied)
}

// ---------------------------------------------------------------------------
// Create / delete
// ---------------------------------------------------------------------------

/// Append a new top-level item. `text` is trimmed; blank text is rejected.
pub fn add_item(h: &mut Hierarchy, id: ItemId, text: &str) -> Result<Change, StoreError> {
    let text = non_blank(text)?;
    h.items.push(Item::new(id, text));
    Ok(Change::Applied)
}

/// Append a new sub-item (`done = false`) to the end of `item_id`'s subs
pub fn add_sub(
    h: &mut Hierarchy,
    item_id: &ItemId,
    id: SubId,
    text: &str,
) -> Result<Change, StoreError> {
    let item = find_item_mut(h, item_id)?;
    let text = non_blank(text)?;
    item.subs.push(SubItem::new(id, text));
    Ok(Change::Applied)
}

pub fn delete_item(h: &mut Hierarchy, item_id: &ItemId) -> Result<Change, StoreError> {
    let idx = find_item_index(h, item_id)?;
    h.items.remove(idx);
    Ok(Change::Applied)
}

pub fn delete_sub(
    h: &mut Hierarchy,
    item_id: &ItemId,
    sub_id: &SubId,
) -> Result<Change, StoreError> {
    let item = find_item_mut(h, item_id)?;
    let idx = item
        .sub_position(sub_id)
        .ok_or_else(|| sub_not_found(sub_id, item_id))?;
    item.subs.remove(idx);
    Ok(Change::Applied)
}

// ---------------------------------------------------------------------------
// Move operations
// ---------------------------------------------------------------------------

/// Move `item_id` so it sits immediately before `target_id`.
///
/// Positions are looked up at call time. Dropping an item on itself, or on
/// the item right after it, leaves the order as it was.
pub fn reorder_item(
    h: &mut Hierarchy,
    item_id: &ItemId,
    target_id: &ItemId,
) -> Result<Change, StoreError> {
    let from = find_item_index(h, item_id)?;
    let to = find_item_index(h, target_id)?;
    if from == to || from + 1 == to {
        return Ok(Change::Unchanged);
    }

    let item = h.items.remove(from);
    // Target shifted left by one if the removed item sat before it
    let insert_at = if from < to { to - 1 } else { to };
    h.items.insert(insert_at, item);
    Ok(Change::Applied)
}

/// Transfer `sub_id` from `from_id` to the end of `to_id`'s sub-list
pub fn reparent_sub(
    h: &mut Hierarchy,
    sub_id: &SubId,
    from_id: &ItemId,
    to_id: &ItemId,
) -> Result<Change, StoreError> {
    let from = find_item_index(h, from_id)?;
    let to = find_item_index(h, to_id)?;
    let sub_idx = h.items[from]
        .sub_position(sub_id)
        .ok_or_else(|| sub_not_found(sub_id, from_id))?;
    if from == to {
        return Ok(Change::Unchanged);
    }

    let sub = h.items[from].subs.remove(sub_idx);
    h.items[to].subs.push(sub);
    Ok(Change::Applied)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn non_blank(text: &str) -> Result<&str, StoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidInput("text is empty".into()));
    }
    Ok(trimmed)
}

fn find_item_index(h: &Hierarchy, item_id: &ItemId) -> Result<usize, StoreError> {
    h.position(item_id)
        .ok_or_else(|| StoreError::NotFound(format!("item {}", item_id)))
}

fn find_item_mut<'a>(h: &'a mut Hierarchy, item_id: &ItemId) -> Result<&'a mut Item, StoreError> {
    h.item_mut(item_id)
        .ok_or_else(|| StoreError::NotFound(format!("item {}", item_id)))
}

fn sub_not_found(sub_id: &SubId, item_id: &ItemId) -> StoreError {
    StoreError::NotFound(format!("sub {} under item {}", sub_id, item_id))
}
