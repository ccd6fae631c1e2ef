//! Column storage
//!
//! Every storage variant holds optional values so nulls survive casting.
//! Categorical columns are dictionary encoded: a label list plus one
//! optional code per row.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

use crate::schema::ColumnType;

/// Runtime type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
    /// Every value is null; the real type is unknown
    Null,
    Boolean,
    Int64,
    Float32,
    Float64,
    UInt16,
    UInt32,
    Utf8,
    Categorical,
    Datetime,
}

impl DataType {
    /// Returns the type name
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Null => "Null",
            DataType::Boolean => "Boolean",
            DataType::Int64 => "Int64",
            DataType::Float32 => "Float32",
            DataType::Float64 => "Float64",
            DataType::UInt16 => "UInt16",
            DataType::UInt32 => "UInt32",
            DataType::Utf8 => "Utf8",
            DataType::Categorical => "Categorical",
            DataType::Datetime => "Datetime",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl From<ColumnType> for DataType {
    fn from(t: ColumnType) -> Self {
        match t {
            ColumnType::Categorical => DataType::Categorical,
            ColumnType::Utf8 => DataType::Utf8,
            ColumnType::Datetime => DataType::Datetime,
            ColumnType::Float32 => DataType::Float32,
            ColumnType::Float64 => DataType::Float64,
            ColumnType::UInt16 => DataType::UInt16,
            ColumnType::UInt32 => DataType::UInt32,
        }
    }
}

/// Typed column storage
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// All-null column of the given length
    Null(usize),
    Boolean(Vec<Option<bool>>),
    Int64(Vec<Option<i64>>),
    Float32(Vec<Option<f32>>),
    Float64(Vec<Option<f64>>),
    UInt16(Vec<Option<u16>>),
    UInt32(Vec<Option<u32>>),
    Utf8(Vec<Option<String>>),
    Categorical {
        /// Distinct labels in first-seen order
        categories: Vec<String>,
        /// Per-row index into `categories`
        codes: Vec<Option<u32>>,
    },
    Datetime(Vec<Option<NaiveDateTime>>),
}

impl ColumnData {
    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Null(len) => *len,
            ColumnData::Boolean(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::Float32(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
            ColumnData::UInt16(v) => v.len(),
            ColumnData::UInt32(v) => v.len(),
            ColumnData::Utf8(v) => v.len(),
            ColumnData::Categorical { codes, .. } => codes.len(),
            ColumnData::Datetime(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runtime type of the storage
    pub fn dtype(&self) -> DataType {
        match self {
            ColumnData::Null(_) => DataType::Null,
            ColumnData::Boolean(_) => DataType::Boolean,
            ColumnData::Int64(_) => DataType::Int64,
            ColumnData::Float32(_) => DataType::Float32,
            ColumnData::Float64(_) => DataType::Float64,
            ColumnData::UInt16(_) => DataType::UInt16,
            ColumnData::UInt32(_) => DataType::UInt32,
            ColumnData::Utf8(_) => DataType::Utf8,
            ColumnData::Categorical { .. } => DataType::Categorical,
            ColumnData::Datetime(_) => DataType::Datetime,
        }
    }

    /// Number of null values
    pub fn null_count(&self) -> usize {
        fn nulls<T>(v: &[Option<T>]) -> usize {
            v.iter().filter(|x| x.is_none()).count()
        }
        match self {
            ColumnData::Null(len) => *len,
            ColumnData::Boolean(v) => nulls(v),
            ColumnData::Int64(v) => nulls(v),
            ColumnData::Float32(v) => nulls(v),
            ColumnData::Float64(v) => nulls(v),
            ColumnData::UInt16(v) => nulls(v),
            ColumnData::UInt32(v) => nulls(v),
            ColumnData::Utf8(v) => nulls(v),
            ColumnData::Categorical { codes, .. } => nulls(codes),
            ColumnData::Datetime(v) => nulls(v),
        }
    }

    /// All-null storage of a declared type
    pub fn nulls(column_type: ColumnType, len: usize) -> Self {
        match column_type {
            ColumnType::Categorical => ColumnData::Categorical {
                categories: Vec::new(),
                codes: vec![None; len],
            },
            ColumnType::Utf8 => ColumnData::Utf8(vec![None; len]),
            ColumnType::Datetime => ColumnData::Datetime(vec![None; len]),
            ColumnType::Float32 => ColumnData::Float32(vec![None; len]),
            ColumnType::Float64 => ColumnData::Float64(vec![None; len]),
            ColumnType::UInt16 => ColumnData::UInt16(vec![None; len]),
            ColumnType::UInt32 => ColumnData::UInt32(vec![None; len]),
        }
    }

    /// Dictionary-encodes string labels, keeping first-seen order
    pub fn categorical_from<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut categories: Vec<String> = Vec::new();
        let mut index: std::collections::HashMap<String, u32> = std::collections::HashMap::new();
        let codes = values
            .into_iter()
            .map(|value| {
                value.map(|label| {
                    let label = label.as_ref();
                    match index.get(label) {
                        Some(code) => *code,
                        None => {
                            let code = categories.len() as u32;
                            categories.push(label.to_string());
                            index.insert(label.to_string(), code);
                            code
                        }
                    }
                })
            })
            .collect();
        ColumnData::Categorical { categories, codes }
    }

    /// Renders the value at `row` as text, `None` for null or out of range
    pub fn text_at(&self, row: usize) -> Option<String> {
        match self {
            ColumnData::Null(_) => None,
            ColumnData::Boolean(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            ColumnData::Int64(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            ColumnData::Float32(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            ColumnData::Float64(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            ColumnData::UInt16(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            ColumnData::UInt32(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            ColumnData::Utf8(v) => v.get(row).cloned().flatten(),
            ColumnData::Categorical { categories, codes } => codes
                .get(row)
                .copied()
                .flatten()
                .and_then(|c| categories.get(c as usize).cloned()),
            ColumnData::Datetime(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|x| x.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
        }
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Convenience constructor for a text column
    pub fn utf8<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self::new(
            name,
            ColumnData::Utf8(values.into_iter().map(|v| v.map(Into::into)).collect()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn dtype(&self) -> DataType {
        self.data.dtype()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_encoding_keeps_first_seen_order() {
        let data = ColumnData::categorical_from(vec![Some("b"), Some("a"), None, Some("b")]);
        match &data {
            ColumnData::Categorical { categories, codes } => {
                assert_eq!(categories, &vec!["b".to_string(), "a".to_string()]);
                assert_eq!(codes, &vec![Some(0), Some(1), None, Some(0)]);
            }
            other => panic!("expected categorical, got {:?}", other),
        }
        assert_eq!(data.null_count(), 1);
        assert_eq!(data.text_at(3).as_deref(), Some("b"));
        assert_eq!(data.text_at(2), None);
    }

    #[test]
    fn test_dtype_and_len() {
        assert_eq!(ColumnData::Null(4).dtype(), DataType::Null);
        assert_eq!(ColumnData::Null(4).len(), 4);
        assert_eq!(ColumnData::Null(4).null_count(), 4);

        let col = Column::utf8("x", vec![Some("1"), None]);
        assert_eq!(col.dtype(), DataType::Utf8);
        assert_eq!(col.len(), 2);
        assert_eq!(col.name(), "x");
    }

    #[test]
    fn test_typed_nulls() {
        let data = ColumnData::nulls(ColumnType::Categorical, 3);
        assert_eq!(data.dtype(), DataType::Categorical);
        assert_eq!(data.len(), 3);
        assert_eq!(data.null_count(), 3);
        assert_eq!(data.text_at(0), None);

        assert_eq!(
            ColumnData::nulls(ColumnType::Float32, 2),
            ColumnData::Float32(vec![None, None])
        );
        assert_eq!(ColumnData::nulls(ColumnType::Datetime, 0).len(), 0);
    }

    #[test]
    fn test_column_type_maps_to_data_type() {
        assert_eq!(DataType::from(ColumnType::UInt16), DataType::UInt16);
        assert_eq!(DataType::from(ColumnType::Categorical), DataType::Categorical);
        assert_eq!(DataType::Datetime.to_string(), "Datetime");
    }
}
