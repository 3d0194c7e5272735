//! In-memory tabular dataset
//!
//! Column-major storage: one `Column` per header, each holding one `Value`
//! per row. Tables are never mutated after loading; every operation derives
//! a new table.

pub mod correlation;
pub mod loader;
pub mod ops;
pub mod stats;
pub mod value;

pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use loader::{load_bytes, load_path, Encoding};
pub use ops::Comparison;
pub use stats::{describe, missing_counts, ColumnStats, MissingCount, StatsSummary};
pub use value::{Column, ColumnType, Value};

use serde::Serialize;

/// Rows x named columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    #[serde(skip)]
    row_count: usize,
}

impl Table {
    /// Build a table from string rows, treating `na_values` as missing
    ///
    /// Short rows are padded with missing cells.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>, na_values: &[String]) -> Self {
        let mut raw: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(rows.len()); headers.len()];
        for row in rows {
            let mut cells = row.into_iter();
            for column in raw.iter_mut() {
                let cell = cells.next().filter(|c| !na_values.iter().any(|na| na == c));
                column.push(cell);
            }
        }

        let row_count = raw.first().map(Vec::len).unwrap_or(0);
        let columns = headers
            .into_iter()
            .zip(raw)
            .map(|(name, cells)| Column::from_raw(name, cells))
            .collect();

        Self { columns, row_count }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in declared order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Names of Integer and Float columns, in declared order
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.dtype.is_numeric())
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// One row as cells, in column order
    pub fn row(&self, index: usize) -> Vec<&Value> {
        self.columns.iter().map(|c| &c.values[index]).collect()
    }

    /// Derive a table holding the given rows, in the given order
    pub fn take_rows(&self, rows: &[usize]) -> Self {
        Self {
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
            row_count: rows.len(),
        }
    }
}
