//! CLI module for pdstools
//!
//! Commands:
//! - schemas: list the schema catalog
//! - describe: print one schema's columns and types
//! - load: read an export, apply a schema, print a summary

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{describe, load, run, run_command, schemas, summarize};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_response, write_response_to};
