use serde::{Deserialize, Serialize};

use crate::ids::next_id;
use crate::locate::{SourcePath, locate};
use crate::model::{Column, Component, Entity, Layout, Row, Tier};
use crate::ops::{Container, Op, Transaction};
use crate::target::{DragKind, DropTarget};

/// The interaction layer's report that a drag gesture started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragStart {
    pub active_id: String,
    #[serde(default)]
    pub kind: DragKind,
}

/// The interaction layer's report that a drag gesture ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEnd {
    pub active_id: String,
    #[serde(default)]
    pub kind: DragKind,
    /// Token of the zone under the pointer on release, if any.
    #[serde(default)]
    pub over: Option<String>,
}

impl DragEnd {
    pub fn new(active_id: impl Into<String>, kind: DragKind, over: impl Into<String>) -> Self {
        Self {
            active_id: active_id.into(),
            kind,
            over: Some(over.into()),
        }
    }

    /// A release outside every registered drop zone.
    pub fn outside(active_id: impl Into<String>, kind: DragKind) -> Self {
        Self {
            active_id: active_id.into(),
            kind,
            over: None,
        }
    }
}

/// Resolves a finished drag into the tree it produces.
///
/// Returns a structurally equal copy of `layout` when the drop does nothing.
pub fn apply_drag_end(layout: &Layout, event: &DragEnd) -> Layout {
    let Some(over) = event.over.as_deref() else {
        tracing::debug!(active = %event.active_id, "drag released outside drop zones");
        return layout.clone();
    };
    let target = DropTarget::parse(over, layout);
    match plan_drop(layout, &event.active_id, event.kind, &target) {
        Some(tx) => {
            tracing::debug!(
                active = %event.active_id,
                kind = ?event.kind,
                over,
                ?target,
                source = tx.meta.source.as_deref().unwrap_or(""),
                "drop resolved"
            );
            tx.apply(layout)
        }
        None => {
            tracing::debug!(
                active = %event.active_id,
                kind = ?event.kind,
                over,
                ?target,
                "drop ignored"
            );
            layout.clone()
        }
    }
}

/// Picks the edit for dropping `active_id` (declared as `kind`) on `target`.
///
/// Cases are tried in a fixed order and the first match decides, even when it
/// turns out to be a no-op:
/// trash, existing column onto a column zone, existing column onto a row zone,
/// row kind, column kind, new component, existing component onto a column zone,
/// existing component onto another component.
pub fn plan_drop(
    layout: &Layout,
    active_id: &str,
    kind: DragKind,
    target: &DropTarget,
) -> Option<Transaction> {
    let source = locate(layout, active_id);

    if *target == DropTarget::Trash {
        if source.is_external() {
            return None;
        }
        return Some(Transaction::new(vec![Op::Delete { path: source }]).source("trash"));
    }

    if let SourcePath::Column { .. } = source {
        if target.is_column_zone() {
            let (row, gap) = column_gap(layout, target)?;
            return Some(
                Transaction::new(vec![Op::Move {
                    from: source,
                    to: Container::Row { row },
                    index: gap,
                }])
                .source("column.move"),
            );
        }
        if target.is_row_zone() {
            let row = host_row(layout, target)?;
            return Some(
                Transaction::new(vec![Op::Move {
                    from: source,
                    to: Container::Row { row },
                    index: layout.rows[row].columns.len(),
                }])
                .source("column.move_to_row"),
            );
        }
    }

    if kind == DragKind::Row {
        if let Some(index) = row_gap(layout, target) {
            let op = match source {
                SourcePath::Row { .. } => Op::Move {
                    from: source,
                    to: Container::Root,
                    index,
                },
                _ => Op::Insert {
                    container: Container::Root,
                    index,
                    entity: Entity::Row(new_row(layout)),
                },
            };
            return Some(Transaction::new(vec![op]).source("row"));
        }
    }

    if kind == DragKind::Column {
        if target.is_column_zone() {
            let (row, gap) = column_gap(layout, target)?;
            return Some(
                Transaction::new(vec![Op::Insert {
                    container: Container::Row { row },
                    index: gap,
                    entity: Entity::Column(Column::new(next_id(Tier::Column, layout))),
                }])
                .source("column.create"),
            );
        }
        if target.is_row_zone() {
            let row = host_row(layout, target)?;
            return Some(
                Transaction::new(vec![Op::Insert {
                    container: Container::Row { row },
                    index: layout.rows[row].columns.len(),
                    entity: Entity::Column(Column::new(next_id(Tier::Column, layout))),
                }])
                .source("column.append"),
            );
        }
    }

    let existing_component = match source {
        SourcePath::Component { row, column, item } => layout.component(row, column, item),
        _ => None,
    };

    if kind == DragKind::Component && existing_component.is_none() && target.is_column_zone() {
        let (row, column) = column_slot(layout, target)?;
        let item = Component::new(next_id(Tier::Component, layout), active_id, active_id);
        return Some(
            Transaction::new(vec![Op::AppendEnsuringContainer {
                item,
                row,
                column: Some(column),
            }])
            .source("component.create"),
        );
    }

    let component = existing_component?.clone();

    if target.is_column_zone() {
        let (row, column) = column_slot(layout, target)?;
        return Some(
            Transaction::new(vec![
                Op::Delete { path: source },
                Op::AppendEnsuringContainer {
                    item: component,
                    row,
                    column: Some(column),
                },
            ])
            .source("component.move"),
        );
    }

    if let DropTarget::ComponentBody { component_id } = target {
        let SourcePath::Component { row, column, item } = locate(layout, component_id) else {
            return None;
        };
        if component.id == *component_id {
            return None;
        }
        return Some(
            Transaction::new(vec![
                Op::Delete { path: source },
                Op::Insert {
                    container: Container::Column { row, column },
                    index: item,
                    entity: Entity::Component(component),
                },
            ])
            .source("component.reorder"),
        );
    }

    None
}

fn new_row(layout: &Layout) -> Row {
    Row::new(next_id(Tier::Row, layout)).column(Column::new(next_id(Tier::Column, layout)))
}

/// Row and column named by a column zone, if that row still exists.
fn column_slot(layout: &Layout, target: &DropTarget) -> Option<(usize, usize)> {
    let (row, column) = match *target {
        DropTarget::ColumnInsertion { row, column } | DropTarget::ColumnBody { row, column } => {
            (row, column)
        }
        _ => return None,
    };
    (row < layout.rows.len()).then_some((row, column))
}

/// Gap in a row's column list where a column lands. Dropping on a column body
/// means "after this column".
fn column_gap(layout: &Layout, target: &DropTarget) -> Option<(usize, usize)> {
    let (row, column) = column_slot(layout, target)?;
    let gap = match target {
        DropTarget::ColumnBody { .. } => column.saturating_add(1),
        _ => column,
    };
    Some((row, gap))
}

/// Gap in the row list where a row lands.
fn row_gap(layout: &Layout, target: &DropTarget) -> Option<usize> {
    match target {
        DropTarget::Canvas => Some(layout.rows.len()),
        DropTarget::RowInsertion { index } => Some(*index),
        DropTarget::RowBody { row_id } => Some(
            layout
                .row_index(row_id)
                .map_or(layout.rows.len(), |ix| ix + 1),
        ),
        _ => None,
    }
}

/// Existing row a row zone points at, clamped to the last row.
fn host_row(layout: &Layout, target: &DropTarget) -> Option<usize> {
    let last = layout.rows.len().checked_sub(1)?;
    let ix = match target {
        DropTarget::RowInsertion { index } => *index,
        DropTarget::EmptyRowBody { row } => *row,
        DropTarget::RowBody { row_id } => layout.row_index(row_id)?,
        _ => return None,
    };
    Some(ix.min(last))
}
