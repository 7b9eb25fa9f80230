use crate::model::{ItemId, SubId};

use super::target::{DropTarget, RowRef};

/// Raw input family a session came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Pointer,
    Touch,
}

/// Which tier the dragged row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Item,
    Sub,
}

/// An in-progress drag, independent of the input device.
///
/// Holds the dragged row by identity only; positions are looked up again
/// when the drop is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub source: RowRef,
    pub modality: Modality,
}

impl DragSession {
    pub fn new(source: RowRef, modality: Modality) -> Self {
        DragSession { source, modality }
    }

    pub fn kind(&self) -> DragKind {
        match self.source {
            RowRef::Item(_) => DragKind::Item,
            RowRef::Sub { .. } => DragKind::Sub,
        }
    }

    /// Token of the dragged row
    pub fn id(&self) -> &str {
        self.source.id()
    }

    /// Owning item, for sub drags
    pub fn parent_id(&self) -> Option<&ItemId> {
        match &self.source {
            RowRef::Item(_) => None,
            RowRef::Sub { parent, .. } => Some(parent),
        }
    }

    /// Own token, for sub drags
    pub fn sub_id(&self) -> Option<&SubId> {
        match &self.source {
            RowRef::Item(_) => None,
            RowRef::Sub { id, .. } => Some(id),
        }
    }
}

/// A finished drag handed to the drop resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropRequest {
    pub session: DragSession,
    pub target: Option<DropTarget>,
}
