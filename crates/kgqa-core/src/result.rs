//! Tabular result of a graph query.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One result row: column name to value, in RETURN order.
pub type Row = serde_json::Map<String, Value>;

/// Rows of named columns. Values may be scalars, lists, or maps
/// (graph elements serialize to maps).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Build from rows, taking columns in first-seen order.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, rows }
    }

    /// Build from a column-major map, e.g. `{"e.name": ["a", "b"]}`.
    ///
    /// Shorter columns are padded with `null`.
    pub fn from_columnar(columns: BTreeMap<String, Vec<Value>>) -> Self {
        let height = columns.values().map(Vec::len).max().unwrap_or(0);
        let mut rows = vec![Row::new(); height];
        for (name, values) in &columns {
            for (i, row) in rows.iter_mut().enumerate() {
                row.insert(name.clone(), values.get(i).cloned().unwrap_or(Value::Null));
            }
        }
        Self {
            columns: columns.into_keys().collect(),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of one column, in row order.
    pub fn column_values(&self, column: &str) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| row.get(column).cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// Column-major view: each column name maps to the list of its values.
    pub fn to_columnar(&self) -> serde_json::Map<String, Value> {
        self.columns
            .iter()
            .map(|c| (c.clone(), Value::Array(self.column_values(c))))
            .collect()
    }

    /// Compact JSON of the columnar view, used as synthesis context.
    pub fn render_context(&self) -> String {
        Value::Object(self.to_columnar()).to_string()
    }
}
