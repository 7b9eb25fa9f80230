use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::filter::Filter;
use super::item::{Item, ItemId, SubId, SubItem};

/// The ordered two-tier list. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hierarchy {
    pub items: Vec<Item>,
}

impl Hierarchy {
    pub fn new(items: Vec<Item>) -> Self {
        Hierarchy { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|t| &t.id == id)
    }

    pub fn item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|t| &t.id == id)
    }

    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|t| &t.id == id)
    }

    pub fn sub(&self, item_id: &ItemId, sub_id: &SubId) -> Option<&SubItem> {
        self.item(item_id)?.sub(sub_id)
    }

    /// Top-level items not yet done ("N items left")
    pub fn items_left(&self) -> usize {
        self.items.iter().filter(|t| !t.done).count()
    }

    /// Top-level items passing `filter`, in order
    pub fn visible(&self, filter: Filter) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |t| filter.matches(t))
    }

    /// First item id used twice, or sub id appearing under two items or
    /// twice under one.
    pub fn duplicate_id(&self) -> Option<&str> {
        let mut items = HashSet::new();
        let mut subs = HashSet::new();
        for item in &self.items {
            if !items.insert(&item.id) {
                return Some(item.id.as_str());
            }
            for sub in &item.subs {
                if !subs.insert(&sub.id) {
                    return Some(sub.id.as_str());
                }
            }
        }
        None
    }

    /// Every identity token present, top-level and sub
    pub fn all_tokens(&self) -> impl Iterator<Item = &str> {
        self.items.iter().flat_map(|t| {
            std::iter::once(t.id.as_str()).chain(t.subs.iter().map(|s| s.id.as_str()))
        })
    }
}
