use serde::{Deserialize, Serialize};

use crate::model::{Column, Component, Layout, Row};

const ROW_TYPE: &str = "ROW";
const COLUMN_TYPE: &str = "COLUMN";
const FALLBACK_COMPONENT_TYPE: &str = "COMPONENT";

/// Read-only structural projection of a [`Layout`] for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportValue {
    pub layout: Vec<ExportRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub children: Vec<ExportColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportColumn {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub children: Vec<ExportComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl ExportValue {
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            layout: layout.rows.iter().map(ExportRow::from).collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl From<&Row> for ExportRow {
    fn from(row: &Row) -> Self {
        Self {
            kind: ROW_TYPE.to_string(),
            id: row.id.clone(),
            children: row.columns.iter().map(ExportColumn::from).collect(),
        }
    }
}

impl From<&Column> for ExportColumn {
    fn from(column: &Column) -> Self {
        Self {
            kind: COLUMN_TYPE.to_string(),
            id: column.id.clone(),
            children: column.components.iter().map(ExportComponent::from).collect(),
        }
    }
}

impl From<&Component> for ExportComponent {
    fn from(component: &Component) -> Self {
        Self {
            kind: export_type(component),
            id: component.id.clone(),
        }
    }
}

/// Uppercased component type, then label, then `COMPONENT`.
fn export_type(component: &Component) -> String {
    [&component.component_type, &component.label]
        .into_iter()
        .find(|s| !s.is_empty())
        .map_or_else(|| FALLBACK_COMPONENT_TYPE.to_string(), |s| s.to_uppercase())
}
