use serde::{Deserialize, Serialize};

use crate::reconcile::DragStart;
use crate::target::DragKind;

/// A draggable entry of the item palette. Palette ids never collide with tree
/// ids, so dragging one always counts as external.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteItem {
    pub id: String,
    pub label: String,
    pub kind: DragKind,
}

impl PaletteItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: DragKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
        }
    }

    pub fn drag_start(&self) -> DragStart {
        DragStart {
            active_id: self.id.clone(),
            kind: self.kind,
        }
    }
}

pub fn palette() -> Vec<PaletteItem> {
    vec![
        PaletteItem::new("row", "row", DragKind::Row),
        PaletteItem::new("column", "column", DragKind::Column),
        PaletteItem::new("demo", "demo item", DragKind::Component),
        PaletteItem::new("image", "image", DragKind::Component),
        PaletteItem::new("input", "input", DragKind::Component),
    ]
}
