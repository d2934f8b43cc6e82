use serde::{Deserialize, Serialize};

use crate::ids::next_id;
use crate::locate::SourcePath;
use crate::model::{Column, Component, Entity, Layout, Tier};

/// An ordered list that can receive entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Container {
    /// The layout's row list.
    Root,
    /// A row's column list.
    Row { row: usize },
    /// A column's component list.
    Column { row: usize, column: usize },
}

impl Container {
    /// Tier of the entities this container holds.
    pub fn child_tier(&self) -> Tier {
        match self {
            Container::Root => Tier::Row,
            Container::Row { .. } => Tier::Column,
            Container::Column { .. } => Tier::Component,
        }
    }

    /// The container `path` lives in, with its index there.
    pub fn of(path: SourcePath) -> Option<(Container, usize)> {
        match path {
            SourcePath::Row { row } => Some((Container::Root, row)),
            SourcePath::Column { row, column } => Some((Container::Row { row }, column)),
            SourcePath::Component { row, column, item } => {
                Some((Container::Column { row, column }, item))
            }
            SourcePath::External => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    /// Removes the entity at `path` together with everything nested in it.
    Delete { path: SourcePath },
    /// Inserts `entity` at `index`, clamped to `0..=len`.
    Insert {
        container: Container,
        index: usize,
        entity: Entity,
    },
    /// Repositions an existing entity within its tier.
    ///
    /// `index` is a gap index in the destination before removal; moving forward
    /// inside the same container lands one slot earlier so that "drop after X"
    /// keeps meaning the same thing in both directions.
    Move {
        from: SourcePath,
        to: Container,
        index: usize,
    },
    /// Puts `item` into row `row`, creating a host column when the row has none.
    /// `column` is clamped to the existing columns; `None` means the last one.
    AppendEnsuringContainer {
        item: Component,
        row: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        column: Option<usize>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Ops applied in order to produce one new snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub ops: Vec<Op>,
    #[serde(default)]
    pub meta: TransactionMeta,
}

impl Transaction {
    pub fn new(ops: Vec<Op>) -> Self {
        Self {
            ops,
            meta: TransactionMeta::default(),
        }
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.meta.source = Some(source.into());
        self
    }

    /// Applies every op to a fresh copy of `layout`. `layout` is never touched.
    pub fn apply(&self, layout: &Layout) -> Layout {
        let mut next = layout.clone();
        for op in &self.ops {
            apply_op_to(&mut next, op);
        }
        next
    }
}

/// Applies a single op to a fresh copy of `layout`.
pub fn apply_op(layout: &Layout, op: &Op) -> Layout {
    let mut next = layout.clone();
    apply_op_to(&mut next, op);
    next
}

fn apply_op_to(layout: &mut Layout, op: &Op) {
    let applied = match op {
        Op::Delete { path } => remove_entity(layout, *path).is_some(),
        Op::Insert {
            container,
            index,
            entity,
        } => insert_entity(layout, *container, *index, entity.clone()),
        Op::Move { from, to, index } => move_entity(layout, *from, *to, *index),
        Op::AppendEnsuringContainer { item, row, column } => {
            append_ensuring_container(layout, item.clone(), *row, *column)
        }
    };
    if !applied {
        tracing::debug!(?op, "op skipped");
    }
}

fn remove_entity(layout: &mut Layout, path: SourcePath) -> Option<Entity> {
    match path {
        SourcePath::Row { row } => {
            (row < layout.rows.len()).then(|| Entity::Row(layout.rows.remove(row)))
        }
        SourcePath::Column { row, column } => {
            let columns = &mut layout.rows.get_mut(row)?.columns;
            (column < columns.len()).then(|| Entity::Column(columns.remove(column)))
        }
        SourcePath::Component { row, column, item } => {
            let components = &mut layout.rows.get_mut(row)?.columns.get_mut(column)?.components;
            (item < components.len()).then(|| Entity::Component(components.remove(item)))
        }
        SourcePath::External => None,
    }
}

fn container_len(layout: &Layout, container: Container) -> Option<usize> {
    match container {
        Container::Root => Some(layout.rows.len()),
        Container::Row { row } => layout.row(row).map(|r| r.columns.len()),
        Container::Column { row, column } => layout.column(row, column).map(|c| c.components.len()),
    }
}

fn insert_entity(layout: &mut Layout, container: Container, index: usize, entity: Entity) -> bool {
    match (container, entity) {
        (Container::Root, Entity::Row(row)) => {
            let ix = index.min(layout.rows.len());
            layout.rows.insert(ix, row);
            true
        }
        (Container::Row { row }, Entity::Column(column)) => {
            let Some(target) = layout.rows.get_mut(row) else {
                return false;
            };
            let ix = index.min(target.columns.len());
            target.columns.insert(ix, column);
            true
        }
        (Container::Column { row, column }, Entity::Component(component)) => {
            let Some(target) = layout
                .rows
                .get_mut(row)
                .and_then(|r| r.columns.get_mut(column))
            else {
                return false;
            };
            let ix = index.min(target.components.len());
            target.components.insert(ix, component);
            true
        }
        _ => false,
    }
}

fn move_entity(layout: &mut Layout, from: SourcePath, to: Container, index: usize) -> bool {
    let Some((from_container, from_ix)) = Container::of(from) else {
        return false;
    };
    if from_container.child_tier() != to.child_tier() || container_len(layout, to).is_none() {
        return false;
    }

    let to_ix = if from_container == to {
        reorder_to_index(from_ix, index)
    } else {
        index
    };

    let Some(entity) = remove_entity(layout, from) else {
        return false;
    };
    insert_entity(layout, to, to_ix, entity)
}

/// Final index for an item leaving `from_ix` towards gap `gap_ix` of the same list.
pub fn reorder_to_index(from_ix: usize, gap_ix: usize) -> usize {
    if from_ix < gap_ix {
        gap_ix - 1
    } else {
        gap_ix
    }
}

fn append_ensuring_container(
    layout: &mut Layout,
    item: Component,
    row: usize,
    column: Option<usize>,
) -> bool {
    if row >= layout.rows.len() {
        return false;
    }
    if layout.rows[row].columns.is_empty() {
        let host = Column::new(next_id(Tier::Column, layout)).component(item);
        layout.rows[row].columns.push(host);
        return true;
    }

    let columns = &mut layout.rows[row].columns;
    let last = columns.len() - 1;
    let ix = column.map_or(last, |c| c.min(last));
    columns[ix].components.push(item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;

    fn column_with(ids: &[&str]) -> Layout {
        let mut column = Column::new("column0");
        for id in ids {
            column = column.component(Component::new(*id, *id, "COMPONENT"));
        }
        Layout::new(vec![Row::new("row0").column(column)])
    }

    fn component_ids(layout: &Layout) -> Vec<&str> {
        layout.ids(Tier::Component)
    }

    #[test]
    fn move_forward_in_same_container_shifts_left() {
        let layout = column_with(&["a", "b", "c"]);
        let next = apply_op(
            &layout,
            &Op::Move {
                from: SourcePath::Component {
                    row: 0,
                    column: 0,
                    item: 0,
                },
                to: Container::Column { row: 0, column: 0 },
                index: 2,
            },
        );
        assert_eq!(component_ids(&next), vec!["b", "a", "c"]);
        assert_eq!(component_ids(&layout), vec!["a", "b", "c"]);
    }

    #[test]
    fn move_backward_in_same_container_keeps_index() {
        let layout = column_with(&["a", "b", "c", "d"]);
        let next = apply_op(
            &layout,
            &Op::Move {
                from: SourcePath::Component {
                    row: 0,
                    column: 0,
                    item: 3,
                },
                to: Container::Column { row: 0, column: 0 },
                index: 1,
            },
        );
        assert_eq!(component_ids(&next), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn move_around_self_is_noop() {
        let layout = column_with(&["a", "b", "c"]);
        for gap in [1, 2] {
            let next = apply_op(
                &layout,
                &Op::Move {
                    from: SourcePath::Component {
                        row: 0,
                        column: 0,
                        item: 1,
                    },
                    to: Container::Column { row: 0, column: 0 },
                    index: gap,
                },
            );
            assert_eq!(next, layout);
        }
    }

    #[test]
    fn move_across_containers_skips_correction() {
        let layout = Layout::new(vec![
            Row::new("row0")
                .column(
                    Column::new("column0")
                        .component(Component::new("a", "a", "x"))
                        .component(Component::new("b", "b", "x")),
                )
                .column(Column::new("column1").component(Component::new("c", "c", "x"))),
        ]);
        let next = apply_op(
            &layout,
            &Op::Move {
                from: SourcePath::Component {
                    row: 0,
                    column: 0,
                    item: 0,
                },
                to: Container::Column { row: 0, column: 1 },
                index: 1,
            },
        );
        let ids: Vec<&str> = next.rows[0].columns[1]
            .components
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn move_rejects_tier_mismatch_and_missing_target() {
        let layout = Layout::seed();
        let mismatch = Op::Move {
            from: SourcePath::Column { row: 0, column: 0 },
            to: Container::Root,
            index: 0,
        };
        assert_eq!(apply_op(&layout, &mismatch), layout);

        let missing = Op::Move {
            from: SourcePath::Column { row: 0, column: 0 },
            to: Container::Row { row: 7 },
            index: 0,
        };
        assert_eq!(apply_op(&layout, &missing), layout);
    }

    #[test]
    fn insert_clamps_index() {
        let layout = Layout::seed();
        let next = apply_op(
            &layout,
            &Op::Insert {
                container: Container::Row { row: 1 },
                index: 99,
                entity: Entity::Column(Column::new("column3")),
            },
        );
        assert_eq!(next.rows[1].columns.last().map(|c| c.id.as_str()), Some("column3"));
    }

    #[test]
    fn delete_removes_nested_children() {
        let layout = Layout::seed();
        let next = apply_op(
            &layout,
            &Op::Delete {
                path: SourcePath::Row { row: 0 },
            },
        );
        assert_eq!(next.rows.len(), 1);
        assert!(!next.ids(Tier::Component).contains(&"component0"));
        assert_eq!(
            apply_op(
                &layout,
                &Op::Delete {
                    path: SourcePath::External
                }
            ),
            layout
        );
    }

    #[test]
    fn append_creates_host_column_in_empty_row() {
        let layout = Layout::new(vec![
            Row::new("row0").column(Column::new("column4")),
            Row::new("row1"),
        ]);
        let next = apply_op(
            &layout,
            &Op::AppendEnsuringContainer {
                item: Component::new("component0", "input", "input"),
                row: 1,
                column: Some(3),
            },
        );
        assert_eq!(next.rows[1].columns.len(), 1);
        assert_eq!(next.rows[1].columns[0].id, "column5");
        assert_eq!(next.rows[1].columns[0].components[0].id, "component0");
    }

    #[test]
    fn append_clamps_column_index() {
        let layout = Layout::seed();
        let next = apply_op(
            &layout,
            &Op::AppendEnsuringContainer {
                item: Component::new("component3", "demo", "demo"),
                row: 1,
                column: Some(10),
            },
        );
        assert_eq!(next.rows[1].columns[1].components.len(), 1);
        assert_eq!(next.rows[1].columns[1].components[0].id, "component3");
    }

    #[test]
    fn reorder_to_index_matches_gap_semantics() {
        assert_eq!(reorder_to_index(1, 4), 3);
        assert_eq!(reorder_to_index(3, 1), 1);
        assert_eq!(reorder_to_index(2, 2), 2);
        assert_eq!(reorder_to_index(2, 3), 2);
    }
}
