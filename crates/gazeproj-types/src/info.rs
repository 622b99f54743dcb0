//! Session info records and the aggregated sessions table.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the field every session info record must carry.
pub const INDEX_FIELD: &str = "index";

/// Summary record reported by a single session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionInfo(Map<String, Value>);

impl SessionInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a record with its `index` field set.
    pub fn with_index(index: impl Into<Value>) -> Self {
        let mut info = Self::new();
        info.insert(INDEX_FIELD, index);
        info
    }

    /// Builder-style field insertion.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The row identifier of this record, if present.
    pub fn index(&self) -> Option<&Value> {
        self.get(INDEX_FIELD)
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for SessionInfo {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl FromIterator<(String, Value)> for SessionInfo {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One row of the sessions table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRow {
    /// The session's own reported `index`.
    pub index: Value,
    /// Cell values aligned with [`SessionsTable::columns`]; absent fields are null.
    pub values: Vec<Value>,
}

/// Tabular summary of all sessions in a project, keyed by `index`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionsTable {
    columns: Vec<String>,
    rows: Vec<SessionRow>,
}

impl SessionsTable {
    pub fn new(columns: Vec<String>, rows: Vec<SessionRow>) -> Self {
        Self { columns, rows }
    }

    /// Non-index column names, in first-appearance order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[SessionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the row whose identifier equals `index`.
    pub fn row(&self, index: &Value) -> Option<&SessionRow> {
        self.rows.iter().find(|row| &row.index == index)
    }

    /// Cell at (`index`, `column`). Returns `None` for unknown rows or columns.
    pub fn cell(&self, index: &Value, column: &str) -> Option<&Value> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.row(index).and_then(|row| row.values.get(col))
    }

    /// Rows as JSON objects, `index` first.
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                record.insert(INDEX_FIELD.to_string(), row.index.clone());
                for (column, value) in self.columns.iter().zip(&row.values) {
                    record.insert(column.clone(), value.clone());
                }
                record
            })
            .collect()
    }

    /// Render as a plain aligned text table.
    pub fn to_text(&self) -> String {
        let header: Vec<String> = std::iter::once(INDEX_FIELD.to_string())
            .chain(self.columns.iter().cloned())
            .collect();
        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                std::iter::once(display_cell(&row.index))
                    .chain(row.values.iter().map(display_cell))
                    .collect()
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for line in &body {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for line in std::iter::once(&header).chain(body.iter()) {
            let cells: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

fn display_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
