//! Tables and the sources that produce them
//!
//! A [`Table`] is an ordered list of equal-length named columns. Raw tables
//! come from [`source`]; typed tables come from applying a schema.

mod column;
mod frame;
pub mod source;

pub use column::{Column, ColumnData, DataType};
pub use frame::{RawTable, Table, TypedTable};
pub use source::{read_ndjson, read_table, read_zip_export};
