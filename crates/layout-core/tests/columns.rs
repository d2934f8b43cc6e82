use gridcraft_core::{Column, Component, DragEnd, DragKind, Layout, Row, apply_drag_end};

fn drop(layout: &Layout, active: &str, kind: DragKind, over: &str) -> Layout {
    apply_drag_end(layout, &DragEnd::new(active, kind, over))
}

fn column_ids(layout: &Layout, row: usize) -> Vec<&str> {
    layout.rows[row]
        .columns
        .iter()
        .map(|column| column.id.as_str())
        .collect()
}

/// row0: column0 | column1 | column2, row1: empty.
fn three_columns() -> Layout {
    Layout::new(vec![
        Row::new("row0")
            .column(Column::new("column0").component(Component::new("component0", "a", "a")))
            .column(Column::new("column1"))
            .column(Column::new("column2").width(120.0)),
        Row::new("row1"),
    ])
}

#[test]
fn column_dropped_on_column_body_lands_after_it() {
    let layout = three_columns();
    let next = drop(&layout, "column0", DragKind::Column, "col-drop-0-1");
    assert_eq!(column_ids(&next, 0), vec!["column1", "column0", "column2"]);

    let next = drop(&layout, "column0", DragKind::Column, "col-drop-0-2");
    assert_eq!(column_ids(&next, 0), vec!["column1", "column2", "column0"]);
    assert_eq!(next.rows[0].columns[2].components.len(), 1);
}

#[test]
fn column_dropped_on_insert_gap_lands_before_it() {
    let layout = three_columns();
    let next = drop(&layout, "column2", DragKind::Column, "col-insert-0-0");
    assert_eq!(column_ids(&next, 0), vec!["column2", "column0", "column1"]);
    assert_eq!(next.rows[0].columns[0].width, Some(120.0));
}

#[test]
fn column_moves_across_rows_and_leaves_source_row_empty() {
    let next = drop(&Layout::seed(), "column0", DragKind::Column, "col-insert-1-1");
    assert_eq!(column_ids(&next, 1), vec!["column1", "column0", "column2"]);
    assert!(next.rows[0].columns.is_empty());
    assert_eq!(next.rows.len(), 2);
}

#[test]
fn column_dropped_on_row_zones_is_appended() {
    let layout = three_columns();

    let next = drop(&layout, "column1", DragKind::Column, "row-empty-1");
    assert_eq!(column_ids(&next, 0), vec!["column0", "column2"]);
    assert_eq!(column_ids(&next, 1), vec!["column1"]);

    let next = drop(&layout, "column0", DragKind::Column, "row-drop-7");
    assert_eq!(column_ids(&next, 1), vec!["column0"]);

    let next = drop(&layout, "column0", DragKind::Column, "row0");
    assert_eq!(column_ids(&next, 0), vec!["column1", "column2", "column0"]);
}

#[test]
fn existing_column_wins_over_declared_kind() {
    let layout = three_columns();
    let next = drop(&layout, "column0", DragKind::Unknown, "col-drop-0-1");
    assert_eq!(column_ids(&next, 0), vec!["column1", "column0", "column2"]);
}

#[test]
fn existing_column_with_stale_row_is_noop() {
    let layout = three_columns();
    assert_eq!(drop(&layout, "column0", DragKind::Column, "col-drop-5-0"), layout);
}

#[test]
fn palette_column_is_created_at_gap() {
    let layout = three_columns();

    let next = drop(&layout, "column", DragKind::Column, "col-drop-0-0");
    assert_eq!(
        column_ids(&next, 0),
        vec!["column0", "column3", "column1", "column2"]
    );
    assert!(next.rows[0].columns[1].components.is_empty());
    assert_eq!(next.rows[0].columns[1].width, None);

    let next = drop(&layout, "column", DragKind::Column, "col-insert-0-3");
    assert_eq!(
        column_ids(&next, 0),
        vec!["column0", "column1", "column2", "column3"]
    );
}

#[test]
fn palette_column_is_appended_to_row_zones() {
    let layout = three_columns();

    let next = drop(&layout, "column", DragKind::Column, "row-empty-1");
    assert_eq!(column_ids(&next, 1), vec!["column3"]);

    let next = drop(&layout, "column", DragKind::Column, "row0");
    assert_eq!(
        column_ids(&next, 0),
        vec!["column0", "column1", "column2", "column3"]
    );
}

#[test]
fn palette_column_without_rows_is_noop() {
    let layout = Layout::default();
    assert_eq!(drop(&layout, "column", DragKind::Column, "row-drop-0"), layout);
    assert_eq!(drop(&layout, "column", DragKind::Column, "col-insert-0-0"), layout);
}
