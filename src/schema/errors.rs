//! Loader error types
//!
//! Error codes:
//! - PDS_SCHEMA_NOT_FOUND
//! - PDS_CAST_FAILURE
//! - PDS_SOURCE_ERROR
//! - PDS_SHAPE_MISMATCH
//!
//! All errors surface synchronously from the failing call. There is no
//! partial-result mode.

use std::fmt;

use super::types::ColumnType;

/// Loader error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorCode {
    /// Requested schema name is not in the catalog
    SchemaNotFound,
    /// A declared column could not be coerced to its declared type
    CastFailure,
    /// Raw source could not be read or decoded
    SourceError,
    /// Columns of unequal length were combined into one table
    ShapeMismatch,
}

impl LoadErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            LoadErrorCode::SchemaNotFound => "PDS_SCHEMA_NOT_FOUND",
            LoadErrorCode::CastFailure => "PDS_CAST_FAILURE",
            LoadErrorCode::SourceError => "PDS_SOURCE_ERROR",
            LoadErrorCode::ShapeMismatch => "PDS_SHAPE_MISMATCH",
        }
    }
}

impl fmt::Display for LoadErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Offending cell of a failed cast
#[derive(Debug, Clone, PartialEq)]
pub struct CastDetails {
    /// Zero-based row index
    pub row: usize,
    /// The value as found in the raw table, rendered as text
    pub value: String,
    /// Why the value was rejected
    pub reason: String,
}

impl CastDetails {
    pub fn new(row: usize, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            row,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CastDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: value '{}' {}", self.row, self.value, self.reason)
    }
}

/// Loader error with full context
#[derive(Debug)]
pub struct LoadError {
    code: LoadErrorCode,
    message: String,
    /// Column the error refers to, if any
    column: Option<String>,
    /// Target type of a failed cast
    target: Option<ColumnType>,
    /// Offending cell of a failed cast
    details: Option<CastDetails>,
}

impl LoadError {
    /// Create a schema-not-found error
    pub fn schema_not_found(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: LoadErrorCode::SchemaNotFound,
            message: format!("Schema '{}' not found", name),
            column: None,
            target: None,
            details: None,
        }
    }

    /// Create a cast failure for a column and target type
    pub fn cast_failure(
        column: impl Into<String>,
        target: ColumnType,
        details: CastDetails,
    ) -> Self {
        let column = column.into();
        Self {
            code: LoadErrorCode::CastFailure,
            message: format!(
                "Cannot cast column '{}' to {}: {}",
                column, target, details
            ),
            column: Some(column),
            target: Some(target),
            details: Some(details),
        }
    }

    /// Create a cast failure where the whole source type is unsupported
    pub fn unsupported_cast(
        column: impl Into<String>,
        target: ColumnType,
        source_type: impl fmt::Display,
    ) -> Self {
        let column = column.into();
        Self {
            code: LoadErrorCode::CastFailure,
            message: format!(
                "Cannot cast column '{}' to {}: unsupported source type {}",
                column, target, source_type
            ),
            column: Some(column),
            target: Some(target),
            details: None,
        }
    }

    /// Create a source error
    pub fn source_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: LoadErrorCode::SourceError,
            message: format!("Cannot read '{}': {}", path.into(), reason.into()),
            column: None,
            target: None,
            details: None,
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(column: impl Into<String>, expected: usize, actual: usize) -> Self {
        let column = column.into();
        Self {
            code: LoadErrorCode::ShapeMismatch,
            message: format!(
                "Column '{}' has {} rows, expected {}",
                column, actual, expected
            ),
            column: Some(column),
            target: None,
            details: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> LoadErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the column name if applicable
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Returns the attempted target type of a cast failure
    pub fn target(&self) -> Option<ColumnType> {
        self.target
    }

    /// Returns the offending cell of a cast failure
    pub fn details(&self) -> Option<&CastDetails> {
        self.details.as_ref()
    }

    /// Whether this is a cast failure
    pub fn is_cast_failure(&self) -> bool {
        self.code == LoadErrorCode::CastFailure
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for LoadError {}

/// Result type for loader operations
pub type LoadResult<T> = Result<T, LoadError>;
