//! In-memory table: ordered named columns of equal length.

use super::column::{Column, DataType};
use crate::schema::{LoadError, LoadResult};

/// Ordered collection of equal-length named columns.
///
/// The same type serves as the raw table handed to the loader and the typed
/// table it returns; only the column storage types differ.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

/// Table as produced by a data source, before any schema is applied
pub type RawTable = Table;

/// Table after a schema has been applied
pub type TypedTable = Table;

impl Table {
    /// Builds a table, checking every column has the same number of rows.
    ///
    /// # Errors
    ///
    /// Returns `PDS_SHAPE_MISMATCH` naming the first column whose length
    /// differs from the first column's.
    pub fn new(columns: Vec<Column>) -> LoadResult<Self> {
        let height = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != height) {
            return Err(LoadError::shape_mismatch(bad.name(), height, bad.len()));
        }
        Ok(Self { columns, height })
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Runtime type of a column, if present
    pub fn dtype(&self, name: &str) -> Option<DataType> {
        self.column(name).map(Column::dtype)
    }

    /// True when the column is present and carries data, i.e. is not
    /// null-typed.
    pub fn column_exists(&self, name: &str) -> bool {
        matches!(self.dtype(name), Some(t) if t != DataType::Null)
    }
}
