//! Drop target resolution.
//!
//! The renderer registers the screen regions it drew (rows, sub-lists,
//! buttons) in a [`HitMap`], parents before children. Resolving a point
//! walks the regions that contain it innermost-first, which gives the same
//! answer as asking "which row / which sub-list encloses this element".

use crate::model::{ItemId, SubId};

/// A screen cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Point { x, y }
    }
}

/// A rectangle of cells, half-open on the right and bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Area {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Area {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && (p.x as u32) < self.x as u32 + self.width as u32
            && (p.y as u32) < self.y as u32 + self.height as u32
    }
}

/// A draggable row, by identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowRef {
    Item(ItemId),
    Sub { id: SubId, parent: ItemId },
}

impl RowRef {
    pub fn is_item(&self) -> bool {
        matches!(self, RowRef::Item(_))
    }

    /// Token of the row's own record
    pub fn id(&self) -> &str {
        match self {
            RowRef::Item(id) => id.as_str(),
            RowRef::Sub { id, .. } => id.as_str(),
        }
    }

    /// The top-level item this row belongs to (itself for item rows)
    pub fn item_id(&self) -> &ItemId {
        match self {
            RowRef::Item(id) => id,
            RowRef::Sub { parent, .. } => parent,
        }
    }
}

/// Clickable buttons inside a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Toggle,
    AddSub,
    Delete,
}

/// What a registered region is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Row(RowRef),
    /// Container holding an item's sub rows
    SubList { owner: ItemId },
    Control { kind: ControlKind, row: RowRef },
}

/// Where a drop landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    ItemRow(ItemId),
    SubList(ItemId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Region {
    area: Area,
    element: Element,
}

/// Regions drawn in the last frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    regions: Vec<Region>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Register a region. Containers must be pushed before their contents.
    pub fn push(&mut self, area: Area, element: Element) {
        self.regions.push(Region { area, element });
    }

    /// Elements containing `p`, innermost first
    pub fn hits(&self, p: Point) -> impl Iterator<Item = &Element> {
        self.regions
            .iter()
            .rev()
            .filter(move |r| r.area.contains(p))
            .map(|r| &r.element)
    }

    /// The innermost element at `p`
    pub fn element_at(&self, p: Point) -> Option<&Element> {
        self.hits(p).next()
    }

    /// Nearest enclosing row
    pub fn row_at(&self, p: Point) -> Option<&RowRef> {
        self.hits(p).find_map(|e| match e {
            Element::Row(row) => Some(row),
            _ => None,
        })
    }

    /// The row a press at `p` would pick up. Presses on a control do not
    /// start drags; they belong to the control.
    pub fn drag_source_at(&self, p: Point) -> Option<&RowRef> {
        if matches!(self.element_at(p), Some(Element::Control { .. })) {
            return None;
        }
        self.row_at(p)
    }

    /// Resolve a drop point to the nearest top-level row, else the nearest
    /// sub-list, else nothing.
    pub fn drop_target_at(&self, p: Point) -> Option<DropTarget> {
        let item_row = self.hits(p).find_map(|e| match e {
            Element::Row(RowRef::Item(id)) => Some(id),
            _ => None,
        });
        if let Some(id) = item_row {
            return Some(DropTarget::ItemRow(id.clone()));
        }
        self.hits(p).find_map(|e| match e {
            Element::SubList { owner } => Some(DropTarget::SubList(owner.clone())),
            _ => None,
        })
    }
}
