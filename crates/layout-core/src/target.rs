use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Layout;

const TRASH: &str = "trash";
const CANVAS: &str = "canvas-drop";
const ROW_DROP: &str = "row-drop-";
const ROW_EMPTY: &str = "row-empty-";
const COL_INSERT: &str = "col-insert-";
const COL_DROP: &str = "col-drop-";

/// Kind the interaction layer declares for the dragged item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    Row,
    Column,
    Component,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A drop-target token parsed against the tree it was produced for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum DropTarget {
    Trash,
    Canvas,
    /// `row-drop-N`: the gap before row `N` (`N == rows.len()` is the end).
    RowInsertion { index: usize },
    /// A bare row id: "after this row".
    RowBody { row_id: String },
    /// `row-empty-N`: the placeholder shown inside a row with no columns.
    EmptyRowBody { row: usize },
    /// `col-insert-R-C`: the gap before column `C` of row `R`.
    ColumnInsertion { row: usize, column: usize },
    /// `col-drop-R-C`: the body of column `C` of row `R`.
    ColumnBody { row: usize, column: usize },
    /// A bare component id: take that component's slot.
    ComponentBody { component_id: String },
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("drop token is empty")]
    Empty,
    #[error("malformed index in drop token '{token}'")]
    BadIndex { token: String },
    #[error("drop token '{token}' names no drop zone, row or component")]
    Unknown { token: String },
}

impl DropTarget {
    /// Parses `token`, collapsing every malformed or unknown token to
    /// [`DropTarget::Unresolved`].
    pub fn parse(token: &str, layout: &Layout) -> Self {
        Self::try_parse(token, layout).unwrap_or_else(|err| {
            tracing::debug!(%err, "unresolved drop target");
            DropTarget::Unresolved
        })
    }

    pub fn try_parse(token: &str, layout: &Layout) -> Result<Self, TokenError> {
        if token.is_empty() {
            return Err(TokenError::Empty);
        }
        if token == TRASH {
            return Ok(DropTarget::Trash);
        }
        if token == CANVAS {
            return Ok(DropTarget::Canvas);
        }
        if let Some(rest) = token.strip_prefix(ROW_DROP) {
            let index = parse_index(rest, token)?;
            return Ok(DropTarget::RowInsertion { index });
        }
        if let Some(rest) = token.strip_prefix(ROW_EMPTY) {
            let row = parse_index(rest, token)?;
            return Ok(DropTarget::EmptyRowBody { row });
        }
        if let Some(rest) = token.strip_prefix(COL_INSERT) {
            let (row, column) = parse_index_pair(rest, token)?;
            return Ok(DropTarget::ColumnInsertion { row, column });
        }
        if let Some(rest) = token.strip_prefix(COL_DROP) {
            let (row, column) = parse_index_pair(rest, token)?;
            return Ok(DropTarget::ColumnBody { row, column });
        }

        if layout.rows.iter().any(|row| row.id == token) {
            return Ok(DropTarget::RowBody {
                row_id: token.to_string(),
            });
        }
        let is_component = layout
            .rows
            .iter()
            .flat_map(|row| row.columns.iter())
            .flat_map(|column| column.components.iter())
            .any(|component| component.id == token);
        if is_component {
            return Ok(DropTarget::ComponentBody {
                component_id: token.to_string(),
            });
        }

        Err(TokenError::Unknown {
            token: token.to_string(),
        })
    }

    pub fn is_column_zone(&self) -> bool {
        matches!(
            self,
            DropTarget::ColumnInsertion { .. } | DropTarget::ColumnBody { .. }
        )
    }

    pub fn is_row_zone(&self) -> bool {
        matches!(
            self,
            DropTarget::RowInsertion { .. }
                | DropTarget::RowBody { .. }
                | DropTarget::EmptyRowBody { .. }
        )
    }

    /// Whether this zone highlights while an item of `kind` hovers it.
    pub fn accepts(&self, kind: DragKind) -> bool {
        match self {
            DropTarget::Trash => true,
            DropTarget::Canvas | DropTarget::RowInsertion { .. } => kind == DragKind::Row,
            DropTarget::ColumnInsertion { .. } | DropTarget::ColumnBody { .. } => {
                matches!(kind, DragKind::Column | DragKind::Component)
            }
            DropTarget::EmptyRowBody { .. } => kind == DragKind::Column,
            DropTarget::RowBody { .. }
            | DropTarget::ComponentBody { .. }
            | DropTarget::Unresolved => false,
        }
    }
}

fn parse_index(digits: &str, token: &str) -> Result<usize, TokenError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TokenError::BadIndex {
            token: token.to_string(),
        });
    }
    digits.parse().map_err(|_| TokenError::BadIndex {
        token: token.to_string(),
    })
}

fn parse_index_pair(rest: &str, token: &str) -> Result<(usize, usize), TokenError> {
    let Some((row, column)) = rest.split_once('-') else {
        return Err(TokenError::BadIndex {
            token: token.to_string(),
        });
    };
    Ok((parse_index(row, token)?, parse_index(column, token)?))
}
