use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a top-level item. Opaque, never reused once issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Identity of a sub-item. Unique within the session, not just its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubId(String);

impl ItemId {
    pub fn new(token: impl Into<String>) -> Self {
        ItemId(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SubId {
    pub fn new(token: impl Into<String>) -> Self {
        SubId(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::new(s)
    }
}

impl From<&str> for SubId {
    fn from(s: &str) -> Self {
        SubId::new(s)
    }
}

/// A top-level todo and the sub-items it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    /// Owned sub-items, in display order
    #[serde(default)]
    pub subs: Vec<SubItem>,
}

/// A child task. Always owned by exactly one [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubItem {
    pub id: SubId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl Item {
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Item {
            id,
            text: text.into(),
            done: false,
            subs: Vec::new(),
        }
    }

    pub fn sub(&self, sub_id: &SubId) -> Option<&SubItem> {
        self.subs.iter().find(|s| &s.id == sub_id)
    }

    pub fn sub_mut(&mut self, sub_id: &SubId) -> Option<&mut SubItem> {
        self.subs.iter_mut().find(|s| &s.id == sub_id)
    }

    pub fn sub_position(&self, sub_id: &SubId) -> Option<usize> {
        self.subs.iter().position(|s| &s.id == sub_id)
    }
}

impl SubItem {
    pub fn new(id: SubId, text: impl Into<String>) -> Self {
        SubItem {
            id,
            text: text.into(),
            done: false,
        }
    }
}
