use serde::{Deserialize, Serialize};

/// The page layout: an ordered list of rows, top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Layout {
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    /// Fixed width in pointer units. `None` shares the remaining space with
    /// the other unsized siblings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default)]
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub component_type: String,
}

/// One of the three id namespaces of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Row,
    Column,
    Component,
}

impl Tier {
    pub fn prefix(self) -> &'static str {
        match self {
            Tier::Row => "row",
            Tier::Column => "column",
            Tier::Component => "component",
        }
    }
}

/// A detached row, column or component, used when inserting into the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum Entity {
    Row(Row),
    Column(Column),
    Component(Component),
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
}

impl Column {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width: None,
            components: Vec::new(),
        }
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }
}

impl Component {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        component_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            component_type: component_type.into(),
        }
    }
}

impl Layout {
    pub fn new(rows: impl Into<Vec<Row>>) -> Self {
        Self { rows: rows.into() }
    }

    /// The layout a fresh editor session opens with.
    pub fn seed() -> Self {
        Self::new(vec![
            Row::new("row0").column(
                Column::new("column0")
                    .component(Component::new("component0", "component0", "COMPONENT"))
                    .component(Component::new("component1", "component1", "COMPONENT")),
            ),
            Row::new("row1")
                .column(
                    Column::new("column1")
                        .component(Component::new("component2", "rWGS0vIT1", "COMPONENT")),
                )
                .column(Column::new("column2")),
        ])
    }

    pub fn row(&self, row_ix: usize) -> Option<&Row> {
        self.rows.get(row_ix)
    }

    pub fn column(&self, row_ix: usize, col_ix: usize) -> Option<&Column> {
        self.rows.get(row_ix)?.columns.get(col_ix)
    }

    pub fn component(&self, row_ix: usize, col_ix: usize, item_ix: usize) -> Option<&Component> {
        self.column(row_ix, col_ix)?.components.get(item_ix)
    }

    pub fn row_index(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Every id of `tier`, in tree order.
    pub fn ids(&self, tier: Tier) -> Vec<&str> {
        match tier {
            Tier::Row => self.rows.iter().map(|row| row.id.as_str()).collect(),
            Tier::Column => self
                .rows
                .iter()
                .flat_map(|row| row.columns.iter())
                .map(|column| column.id.as_str())
                .collect(),
            Tier::Component => self
                .rows
                .iter()
                .flat_map(|row| row.columns.iter())
                .flat_map(|column| column.components.iter())
                .map(|component| component.id.as_str())
                .collect(),
        }
    }
}
