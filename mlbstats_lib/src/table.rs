//! A small column-ordered table of JSON cells.
//!
//! Every parser emits one of these. Cells are `serde_json::Value` so a
//! column can hold the API's mix of strings, numbers, booleans and nulls
//! without coercion.

use std::cmp::Ordering;
use std::fmt;
use std::io::Write;

use serde_json::{Map, Value};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::error::MlbStatsError;

pub type Row = Vec<Value>;

/// Static `from -> to` column rename pairs.
pub type RenameMap = [(&'static str, &'static str)];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a table with a fixed column order. Keys missing from a record
    /// become `null`; keys not in `columns` are dropped.
    pub fn from_records<S: AsRef<str>>(records: &[Map<String, Value>], columns: &[S]) -> Self {
        let mut table = Table::new(columns);
        for record in records {
            let row = table
                .columns
                .iter()
                .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                .collect();
            table.rows.push(row);
        }
        table
    }

    /// Appends a row, padding with nulls or truncating to the column count.
    pub fn push_row(&mut self, mut row: Row) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
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

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }

    pub fn cell(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Renames columns that appear in `map`; others are left alone.
    pub fn rename_columns(&mut self, map: &RenameMap) {
        for column in self.columns.iter_mut() {
            if let Some((_, to)) = map.iter().find(|(from, _)| from == column) {
                *column = to.to_string();
            }
        }
    }

    /// Inserts a column at `idx` (clamped to the end). `values` is padded
    /// with nulls or truncated to the row count.
    pub fn insert_column(&mut self, idx: usize, name: &str, mut values: Vec<Value>) {
        let idx = idx.min(self.columns.len());
        values.resize(self.rows.len(), Value::Null);
        self.columns.insert(idx, name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(idx, value);
        }
    }

    /// Reorders to `columns`; missing columns become null, extras are dropped.
    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Table {
        let indices: Vec<Option<usize>> = columns
            .iter()
            .map(|c| self.column_index(c.as_ref()))
            .collect();
        Table {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| {
                    indices
                        .iter()
                        .map(|i| i.map(|i| r[i].clone()).unwrap_or(Value::Null))
                        .collect()
                })
                .collect(),
        }
    }

    /// Stable sort on one column. Numbers (numeric strings included) come
    /// before text and compare numerically, text compares lexically, and
    /// nulls sort last in either direction.
    pub fn sort_by(&mut self, name: &str, descending: bool) {
        let Some(idx) = self.column_index(name) else {
            return;
        };
        self.rows.sort_by(|a, b| {
            let ord = compare_values(&a[idx], &b[idx]);
            match (a[idx].is_null(), b[idx].is_null()) {
                (false, false) if descending => ord.reverse(),
                _ => ord,
            }
        });
    }

    /// Stacks tables vertically. Columns are the union in first-seen order.
    pub fn concat(tables: Vec<Table>) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for t in &tables {
            for c in &t.columns {
                if !columns.contains(c) {
                    columns.push(c.clone());
                }
            }
        }
        let mut out = Table::new(&columns);
        for t in tables {
            let aligned = t.select(&columns);
            out.rows.extend(aligned.rows);
        }
        out
    }

    /// Rows for which `pred` holds on the value of `name`.
    pub fn filter_rows<F>(&self, name: &str, pred: F) -> Table
    where
        F: Fn(&Value) -> bool,
    {
        let rows = match self.column_index(name) {
            Some(idx) => self.rows.iter().filter(|r| pred(&r[idx])).cloned().collect(),
            None => Vec::new(),
        };
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Drops columns whose cells are all null.
    pub fn drop_empty_columns(&mut self) {
        let keep: Vec<bool> = (0..self.columns.len())
            .map(|i| self.rows.iter().any(|r| !r[i].is_null()))
            .collect();
        let mut i = 0;
        self.columns.retain(|_| {
            i += 1;
            keep[i - 1]
        });
        for row in self.rows.iter_mut() {
            let mut i = 0;
            row.retain(|_| {
                i += 1;
                keep[i - 1]
            });
        }
    }

    /// Rows as JSON objects keyed by column.
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|r| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(r.iter().cloned())
                    .collect()
            })
            .collect()
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.records().into_iter().map(Value::Object).collect())
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), MlbStatsError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(cell_text))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(self.columns.iter().cloned());
        for row in &self.rows {
            builder.push_record(row.iter().map(cell_text));
        }
        let mut table = builder.build();
        table.with(Style::psql());
        write!(f, "{}", table)
    }
}

/// Text form of a cell: strings unquoted, null empty.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {}
    }
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => cell_text(a).cmp(&cell_text(b)),
    }
}
