//! Schema subsystem for pdstools
//!
//! Named, immutable column schemas for the platform's export tables and the
//! caster that applies them to raw tables.
//!
//! # Design Principles
//!
//! - Schemas are process-wide constants, never mutated
//! - Declared columns missing from a table are optional
//! - Undeclared columns pass through untouched
//! - A failed cast fails the whole load

pub mod catalog;
mod caster;
mod errors;
mod types;

pub use caster::{apply_schema, SchemaCaster};
pub use errors::{CastDetails, LoadError, LoadErrorCode, LoadResult};
pub use types::{ColumnDef, ColumnType, SchemaDefinition};
