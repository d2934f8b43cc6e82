use serde::{Deserialize, Serialize};

use crate::model::{Layout, Tier};

/// Where a dragged entity lives in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourcePath {
    Row {
        row: usize,
    },
    Column {
        row: usize,
        column: usize,
    },
    Component {
        row: usize,
        column: usize,
        item: usize,
    },
    /// Not in the tree, e.g. dragged from the palette.
    External,
}

impl SourcePath {
    pub fn tier(&self) -> Option<Tier> {
        match self {
            SourcePath::Row { .. } => Some(Tier::Row),
            SourcePath::Column { .. } => Some(Tier::Column),
            SourcePath::Component { .. } => Some(Tier::Component),
            SourcePath::External => None,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, SourcePath::External)
    }
}

/// Finds `id` among rows, columns and components.
///
/// Ids are unique across tiers, so the first hit is the only one.
pub fn locate(layout: &Layout, id: &str) -> SourcePath {
    for (row_ix, row) in layout.rows.iter().enumerate() {
        if row.id == id {
            return SourcePath::Row { row: row_ix };
        }
        for (col_ix, column) in row.columns.iter().enumerate() {
            if column.id == id {
                return SourcePath::Column {
                    row: row_ix,
                    column: col_ix,
                };
            }
            if let Some(item_ix) = column.components.iter().position(|c| c.id == id) {
                return SourcePath::Component {
                    row: row_ix,
                    column: col_ix,
                    item: item_ix,
                };
            }
        }
    }
    SourcePath::External
}
