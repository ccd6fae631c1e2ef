//! Schema type definitions
//!
//! Declared column types (the upstream export's primitive set):
//! - Categorical: low-cardinality string labels
//! - Utf8: free text
//! - Datetime: timestamp without timezone (exports are GMT)
//! - Float32 / Float64: floating point
//! - UInt16 / UInt32: unsigned integers

use serde::Serialize;
use std::fmt;

/// Declared type of a schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnType {
    /// String labels drawn from a small recurring set
    Categorical,
    /// UTF-8 string
    Utf8,
    /// Naive timestamp, interpreted as GMT
    Datetime,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
}

impl ColumnType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Categorical => "Categorical",
            ColumnType::Utf8 => "Utf8",
            ColumnType::Datetime => "Datetime",
            ColumnType::Float32 => "Float32",
            ColumnType::Float64 => "Float64",
            ColumnType::UInt16 => "UInt16",
            ColumnType::UInt32 => "UInt32",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A single declared column: name plus type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name as it appears in the export
    pub name: &'static str,
    /// Declared type
    pub column_type: ColumnType,
}

impl ColumnDef {
    /// Create a column definition
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self { name, column_type }
    }
}

/// Ordered, immutable mapping of column name to declared type.
///
/// Definitions are `static` data; there is no mutation API.
#[derive(Debug, PartialEq, Eq)]
pub struct SchemaDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    columns: &'static [ColumnDef],
}

impl SchemaDefinition {
    /// Create a schema definition over a static column list
    pub const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        columns: &'static [ColumnDef],
    ) -> Self {
        Self {
            name,
            aliases,
            columns,
        }
    }

    /// Canonical schema name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Short names this schema also answers to
    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    /// Declared columns in declaration order
    pub fn columns(&self) -> &'static [ColumnDef] {
        self.columns
    }

    /// Iterates `(name, type)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, ColumnType)> {
        self.columns.iter().map(|c| (c.name, c.column_type))
    }

    /// Declared type of a column, if the schema names it
    pub fn get(&self, column: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.column_type)
    }

    /// Whether the schema declares the column
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Number of declared columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema declares no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether `name` refers to this schema (canonical name or alias, case-insensitive)
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}
