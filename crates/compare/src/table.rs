use crate::classify::{classify, compute_schema};
use crate::polarity::{Highlight, Polarity};
use materials_protocol::{format_label, Material, ABSENT_PLACEHOLDER};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub id: String,
    pub heading: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub material_id: String,
    pub value: String,
    pub highlight: Highlight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// `None` for the fixed Type and Designation rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polarity: Option<Polarity>,
    pub cells: Vec<Cell>,
}

/// Rendered comparison: one column per selected material, fixed rows for
/// type and designation, then one row per unioned property key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl ComparisonTable {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn row(&self, key: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.key.as_deref() == Some(key))
    }
}

pub fn build_table(selected: &[Material]) -> ComparisonTable {
    let columns = selected
        .iter()
        .map(|material| Column {
            id: material.id.clone(),
            heading: material.heading(),
        })
        .collect();

    let mut rows = vec![
        fixed_row("Type", selected, |m| m.material_type.clone()),
        fixed_row("Designation", selected, |m| m.designation.clone()),
    ];

    for key in compute_schema(selected) {
        let highlights = classify(&key, selected);
        let cells = selected
            .iter()
            .map(|material| Cell {
                material_id: material.id.clone(),
                value: material
                    .property(&key)
                    .map(|value| value.display().to_string())
                    .unwrap_or_else(|| ABSENT_PLACEHOLDER.to_string()),
                highlight: highlights
                    .get(&material.id)
                    .copied()
                    .unwrap_or(Highlight::Neutral),
            })
            .collect();
        rows.push(Row {
            label: format_label(&key),
            polarity: Some(Polarity::of(&key)),
            key: Some(key),
            cells,
        });
    }

    ComparisonTable { columns, rows }
}

fn fixed_row(label: &str, selected: &[Material], value: impl Fn(&Material) -> String) -> Row {
    Row {
        key: None,
        label: label.to_string(),
        polarity: None,
        cells: selected
            .iter()
            .map(|material| Cell {
                material_id: material.id.clone(),
                value: value(material),
                highlight: Highlight::Neutral,
            })
            .collect(),
    }
}
