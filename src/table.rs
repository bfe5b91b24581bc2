//! In-memory tabular data shared by every stage of the pipeline.
//!
//! A [`Table`] is an ordered list of column names plus row-major values.
//! Rows are always exactly as wide as the schema.

use crate::error::{PipelineError, Result};
use std::fmt;

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Reads the cell as a float, parsing text if needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(s) => s.trim().parse::<f64>().ok(),
            Value::Null | Value::Bool(_) => None,
        }
    }

    /// Converts the cell to a numeric value: integral text becomes `Int`,
    /// any other parseable text becomes `Float`. Returns `None` when the
    /// cell has no numeric reading.
    pub fn to_numeric(&self) -> Option<Value> {
        match self {
            Value::Int(_) | Value::Float(_) => Some(self.clone()),
            Value::Str(s) => {
                let s = s.trim();
                if let Ok(i) = s.parse::<i64>() {
                    Some(Value::Int(i))
                } else {
                    s.parse::<f64>().ok().map(Value::Float)
                }
            }
            Value::Null | Value::Bool(_) => None,
        }
    }

    /// Converts a JSON scalar from the remote service into a cell.
    /// Nested objects (e.g. geo points) are kept as their JSON text.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Str(s),
            other => Value::Str(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Value::Int(i) => write!(f, "{i}"),
            // Debug keeps the trailing `.0` on integral floats
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Ordered column names plus rows of [`Value`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from rows, padding short rows with `Null` and
    /// truncating long ones to the schema width.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterates over one column's cells, or `None` if the column is absent.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Like [`Table::column`] but absence is a [`PipelineError::MissingColumn`].
    pub fn require_column(&self, name: &str) -> Result<impl Iterator<Item = &Value> + '_> {
        self.column(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    }

    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    /// Appends a record given as `(column, value)` pairs. Unknown columns
    /// are added to the schema and back-filled with `Null`.
    pub fn push_record<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut row = vec![Value::Null; self.columns.len()];
        for (name, value) in fields {
            let idx = match self.column_index(&name) {
                Some(idx) => idx,
                None => {
                    self.columns.push(name);
                    for existing in &mut self.rows {
                        existing.push(Value::Null);
                    }
                    row.push(Value::Null);
                    self.columns.len() - 1
                }
            };
            row[idx] = value;
        }
        self.rows.push(row);
    }

    /// Replaces the named column's values, appending the column if new.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not hold exactly one value per row.
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) {
        assert_eq!(
            values.len(),
            self.rows.len(),
            "column '{name}' length does not match row count"
        );
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Keeps rows whose mask entry is true.
    ///
    /// # Panics
    ///
    /// Panics if the mask length differs from the row count.
    pub fn retain_mask(&mut self, mask: &[bool]) {
        assert_eq!(mask.len(), self.rows.len(), "mask length does not match row count");
        let mut keep = mask.iter();
        self.rows.retain(|_| *keep.next().unwrap_or(&false));
    }

    /// Returns a copy holding only the rows whose mask entry is true.
    pub fn filter_mask(&self, mask: &[bool]) -> Table {
        let rows = self
            .rows
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|(row, _)| row.clone())
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Renames every column through `rename`, leaving rows untouched.
    pub fn rename_columns<F>(self, rename: F) -> Table
    where
        F: Fn(&str) -> String,
    {
        Table {
            columns: self.columns.iter().map(|c| rename(c)).collect(),
            rows: self.rows,
        }
    }

    /// Projects onto `names`, in that order.
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let indices = names
            .iter()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Table {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows,
        })
    }

    /// Stacks tables vertically over the union of their schemas (first-seen
    /// column order). Cells with no value, whether the column was absent
    /// from a table or the cell was `Null`, become `fill`.
    pub fn concat(tables: Vec<Table>, fill: Value) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for table in &tables {
            for column in &table.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let total = tables.iter().map(Table::len).sum();
        let mut rows = Vec::with_capacity(total);
        for table in tables {
            let positions: Vec<Option<usize>> = columns
                .iter()
                .map(|c| table.column_index(c))
                .collect();
            for mut row in table.rows {
                let combined = positions
                    .iter()
                    .map(|pos| match pos {
                        Some(i) => match std::mem::replace(&mut row[*i], Value::Null) {
                            Value::Null => fill.clone(),
                            v => v,
                        },
                        None => fill.clone(),
                    })
                    .collect();
                rows.push(combined);
            }
        }

        Table { columns, rows }
    }
}
