//! Applies a schema to a raw table
//!
//! Casting semantics:
//! - Declared columns missing from the table are skipped
//! - Declared columns present in the table are cast to the declared type
//! - Undeclared columns pass through untouched
//! - Column order and row count are preserved
//! - All-null columns take the declared type with every cell null, never
//!   the text "null"
//!
//! A single failing cell fails the whole call. No partial results.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::catalog;
use super::errors::{CastDetails, LoadError, LoadResult};
use super::types::{ColumnType, SchemaDefinition};
use crate::config::LoaderConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::table::{Column, ColumnData, DataType, RawTable, Table, TypedTable};

/// A parsed numeric cell, before narrowing to the target type
#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

/// Casts raw tables to a schema's declared types.
///
/// The caster holds no state beyond a borrowed configuration and never
/// mutates its input.
pub struct SchemaCaster<'a> {
    config: &'a LoaderConfig,
}

impl<'a> SchemaCaster<'a> {
    /// Creates a caster using the given casting conventions.
    pub fn new(config: &'a LoaderConfig) -> Self {
        Self { config }
    }

    /// Resolves `schema_name` in the catalog and applies it.
    ///
    /// # Errors
    ///
    /// - `PDS_SCHEMA_NOT_FOUND` if the name matches no catalog schema
    /// - `PDS_CAST_FAILURE` if any declared column fails to cast
    pub fn apply_named(&self, raw: &RawTable, schema_name: &str) -> LoadResult<TypedTable> {
        let schema = catalog::lookup(schema_name)?;
        self.apply_schema(raw, schema)
    }

    /// Applies `schema` to `raw`, returning a new typed table.
    ///
    /// # Errors
    ///
    /// Returns `PDS_CAST_FAILURE` naming the first column (in table order)
    /// whose values cannot be coerced to the declared type.
    pub fn apply_schema(
        &self,
        raw: &RawTable,
        schema: &SchemaDefinition,
    ) -> LoadResult<TypedTable> {
        let mut cast = 0usize;
        let mut columns = Vec::with_capacity(raw.width());

        for column in raw.columns() {
            match schema.get(column.name()) {
                Some(target) => {
                    let data = self.cast_column(column, target)?;
                    columns.push(Column::new(column.name(), data));
                    cast += 1;
                }
                None => columns.push(column.clone()),
            }
        }

        let table = Table::new(columns)?;

        let passthrough = raw.width() - cast;
        let skipped = schema.len().saturating_sub(cast);
        log_event_with_fields(
            Event::SchemaApplied,
            &[
                ("schema", schema.name()),
                ("rows", &table.height().to_string()),
                ("cast", &cast.to_string()),
                ("skipped", &skipped.to_string()),
                ("passthrough", &passthrough.to_string()),
            ],
        );

        Ok(table)
    }

    /// Casts one column to `target`.
    fn cast_column(&self, column: &Column, target: ColumnType) -> LoadResult<ColumnData> {
        let data = column.data();
        let source = data.dtype();

        if source == DataType::from(target) {
            return Ok(data.clone());
        }
        if source == DataType::Null {
            return Ok(ColumnData::nulls(target, data.len()));
        }

        let name = column.name();
        match target {
            ColumnType::Categorical => Ok(ColumnData::categorical_from(
                (0..data.len()).map(|row| data.text_at(row)),
            )),
            ColumnType::Utf8 => Ok(ColumnData::Utf8(
                (0..data.len()).map(|row| data.text_at(row)).collect(),
            )),
            ColumnType::Datetime => self.cast_datetime(name, data),
            ColumnType::Float64 => self
                .cast_numeric(name, data, target, |n| match n {
                    Number::Int(i) => Ok(i as f64),
                    Number::Float(f) => Ok(f),
                })
                .map(ColumnData::Float64),
            ColumnType::Float32 => self
                .cast_numeric(name, data, target, |n| match n {
                    Number::Int(i) => Ok(i as f32),
                    Number::Float(f) => {
                        let narrowed = f as f32;
                        if f.is_finite() && narrowed.is_infinite() {
                            Err("overflows Float32".to_string())
                        } else {
                            Ok(narrowed)
                        }
                    }
                })
                .map(ColumnData::Float32),
            ColumnType::UInt16 => self
                .cast_numeric(name, data, target, |n| {
                    unsigned(n, u16::MAX as f64).map(|v| v as u16)
                })
                .map(ColumnData::UInt16),
            ColumnType::UInt32 => self
                .cast_numeric(name, data, target, |n| {
                    unsigned(n, u32::MAX as f64).map(|v| v as u32)
                })
                .map(ColumnData::UInt32),
        }
    }

    /// Casts any numeric or text column through `convert`.
    fn cast_numeric<T>(
        &self,
        name: &str,
        data: &ColumnData,
        target: ColumnType,
        convert: impl Fn(Number) -> Result<T, String>,
    ) -> LoadResult<Vec<Option<T>>> {
        if data.dtype() == DataType::Datetime {
            return Err(LoadError::unsupported_cast(name, target, data.dtype()));
        }

        let mut out = Vec::with_capacity(data.len());
        for row in 0..data.len() {
            let value = self
                .number_at(data, row)
                .and_then(|n| n.map(&convert).transpose())
                .map_err(|reason| {
                    LoadError::cast_failure(
                        name,
                        target,
                        CastDetails::new(row, data.text_at(row).unwrap_or_default(), reason),
                    )
                })?;
            out.push(value);
        }
        Ok(out)
    }

    /// Reads the cell at `row` as a number. `Ok(None)` means null.
    fn number_at(&self, data: &ColumnData, row: usize) -> Result<Option<Number>, String> {
        let number = match data {
            ColumnData::Null(_) | ColumnData::Datetime(_) => None,
            ColumnData::Boolean(v) => v[row].map(|b| Number::Int(i64::from(b))),
            ColumnData::Int64(v) => v[row].map(Number::Int),
            ColumnData::Float32(v) => v[row].map(|f| Number::Float(f64::from(f))),
            ColumnData::Float64(v) => v[row].map(Number::Float),
            ColumnData::UInt16(v) => v[row].map(|u| Number::Int(i64::from(u))),
            ColumnData::UInt32(v) => v[row].map(|u| Number::Int(i64::from(u))),
            ColumnData::Utf8(_) | ColumnData::Categorical { .. } => {
                return match data.text_at(row) {
                    Some(text) => match self.prepare(&text) {
                        Some(text) => parse_number(text).map(Some),
                        None => Ok(None),
                    },
                    None => Ok(None),
                };
            }
        };
        Ok(number)
    }

    /// Parses a text column into datetimes.
    fn cast_datetime(&self, name: &str, data: &ColumnData) -> LoadResult<ColumnData> {
        if !matches!(data, ColumnData::Utf8(_) | ColumnData::Categorical { .. }) {
            return Err(LoadError::unsupported_cast(
                name,
                ColumnType::Datetime,
                data.dtype(),
            ));
        }

        let mut out = Vec::with_capacity(data.len());
        for row in 0..data.len() {
            let text = data.text_at(row);
            let value = match text.as_deref().and_then(|t| self.prepare(t)) {
                Some(t) => Some(self.parse_datetime(t).ok_or_else(|| {
                    LoadError::cast_failure(
                        name,
                        ColumnType::Datetime,
                        CastDetails::new(
                            row,
                            t,
                            "does not match any configured datetime format",
                        ),
                    )
                })?),
                None => None,
            };
            out.push(value);
        }
        Ok(ColumnData::Datetime(out))
    }

    /// Tries each configured format, then RFC 3339, then a bare date.
    fn parse_datetime(&self, text: &str) -> Option<NaiveDateTime> {
        self.config
            .datetime_formats
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|dt| dt.naive_utc())
            })
            .or_else(|| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    /// Trims (if configured) and maps null tokens to `None`.
    fn prepare<'t>(&self, text: &'t str) -> Option<&'t str> {
        let text = if self.config.trim_whitespace {
            text.trim()
        } else {
            text
        };
        if self.config.is_null_token(text) {
            None
        } else {
            Some(text)
        }
    }
}

/// Applies `schema` with the default export conventions.
///
/// See [`SchemaCaster::apply_schema`].
pub fn apply_schema(raw: &RawTable, schema: &SchemaDefinition) -> LoadResult<TypedTable> {
    let config = LoaderConfig::default();
    SchemaCaster::new(&config).apply_schema(raw, schema)
}

fn parse_number(text: &str) -> Result<Number, String> {
    if let Ok(i) = text.parse::<i64>() {
        return Ok(Number::Int(i));
    }
    text.parse::<f64>()
        .map(Number::Float)
        .map_err(|_| "is not a number".to_string())
}

/// Checks a number fits an unsigned integer with the given maximum.
fn unsigned(n: Number, max: f64) -> Result<f64, String> {
    let value = match n {
        Number::Int(i) => i as f64,
        Number::Float(f) => {
            if !f.is_finite() || f.fract() != 0.0 {
                return Err("is not an integer".to_string());
            }
            f
        }
    };
    if value < 0.0 {
        return Err("is negative".to_string());
    }
    if value > max {
        return Err("is out of range".to_string());
    }
    Ok(value)
}
