//! Raw table sources
//!
//! Decodes the platform's exports into a [`RawTable`]:
//! - newline-delimited JSON, one object per line
//! - zip export archives whose `data.json` member holds the NDJSON records
//!
//! Column types are inferred from the JSON values; the schema caster does
//! the real typing afterwards.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::{Map, Value};
use zip::ZipArchive;

use super::column::{Column, ColumnData};
use super::frame::{RawTable, Table};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{LoadError, LoadResult};

/// Name of the records member inside an export archive
pub const EXPORT_DATA_MEMBER: &str = "data.json";

impl Table {
    /// Builds a raw table from JSON objects.
    ///
    /// Columns appear in first-seen key order. A key missing from a record
    /// is null for that row.
    pub fn from_json_records(records: &[Map<String, Value>]) -> LoadResult<RawTable> {
        let mut names: Vec<&str> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for record in records {
            for key in record.keys() {
                if seen.insert(key.as_str()) {
                    names.push(key.as_str());
                }
            }
        }

        let columns = names
            .into_iter()
            .map(|name| {
                let values: Vec<Option<&Value>> = records
                    .iter()
                    .map(|r| r.get(name).filter(|v| !v.is_null()))
                    .collect();
                Column::new(name, infer_column(&values))
            })
            .collect();

        Table::new(columns)
    }
}

/// Picks the narrowest storage that holds every non-null value.
fn infer_column(values: &[Option<&Value>]) -> ColumnData {
    let present = || values.iter().flatten();

    if present().next().is_none() {
        return ColumnData::Null(values.len());
    }
    if present().all(|v| v.is_boolean()) {
        return ColumnData::Boolean(values.iter().map(|v| v.and_then(Value::as_bool)).collect());
    }
    if present().all(|v| v.is_i64()) {
        return ColumnData::Int64(values.iter().map(|v| v.and_then(Value::as_i64)).collect());
    }
    if present().all(|v| v.is_number()) {
        return ColumnData::Float64(values.iter().map(|v| v.and_then(Value::as_f64)).collect());
    }

    ColumnData::Utf8(
        values
            .iter()
            .map(|v| {
                v.map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
            })
            .collect(),
    )
}

/// Parses NDJSON records from a reader. `origin` names the source in errors.
pub fn parse_ndjson<R: BufRead>(reader: R, origin: &str) -> LoadResult<RawTable> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| LoadError::source_error(origin, e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(&line).map_err(|e| {
            LoadError::source_error(origin, format!("line {}: invalid JSON: {}", line_no, e))
        })?;

        match value {
            Value::Object(record) => records.push(record),
            _ => {
                return Err(LoadError::source_error(
                    origin,
                    format!("line {}: expected a JSON object", line_no),
                ))
            }
        }
    }

    Table::from_json_records(&records)
}

/// Reads an NDJSON file.
pub fn read_ndjson(path: &Path) -> LoadResult<RawTable> {
    let origin = path.display().to_string();
    let file = File::open(path).map_err(|e| LoadError::source_error(&origin, e.to_string()))?;
    parse_ndjson(BufReader::new(file), &origin)
}

/// Reads the `data.json` member of an export archive.
pub fn read_zip_export(path: &Path) -> LoadResult<RawTable> {
    let origin = path.display().to_string();
    let file = File::open(path).map_err(|e| LoadError::source_error(&origin, e.to_string()))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| LoadError::source_error(&origin, format!("invalid zip archive: {}", e)))?;

    let member = archive
        .file_names()
        .find(|name| {
            *name == EXPORT_DATA_MEMBER || name.ends_with(&format!("/{}", EXPORT_DATA_MEMBER))
        })
        .map(str::to_string)
        .ok_or_else(|| {
            LoadError::source_error(
                &origin,
                format!("archive has no '{}' member", EXPORT_DATA_MEMBER),
            )
        })?;

    let entry = archive
        .by_name(&member)
        .map_err(|e| LoadError::source_error(&origin, e.to_string()))?;
    parse_ndjson(BufReader::new(entry), &format!("{}!{}", origin, member))
}

/// Reads a raw table, choosing the decoder from the file extension.
///
/// `.zip` is read as an export archive; `.json`, `.ndjson` and `.jsonl` as
/// NDJSON.
pub fn read_table(path: &Path) -> LoadResult<RawTable> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let table = match extension.as_str() {
        "zip" => read_zip_export(path),
        "json" | "ndjson" | "jsonl" => read_ndjson(path),
        other => Err(LoadError::source_error(
            path.display().to_string(),
            format!("unsupported file extension '{}'", other),
        )),
    };

    match &table {
        Ok(t) => log_event_with_fields(
            Event::SourceRead,
            &[
                ("path", &path.display().to_string()),
                ("rows", &t.height().to_string()),
                ("columns", &t.width().to_string()),
            ],
        ),
        Err(e) => log_event_with_fields(
            Event::SourceFailed,
            &[("path", &path.display().to_string()), ("error", e.message())],
        ),
    }

    table
}
