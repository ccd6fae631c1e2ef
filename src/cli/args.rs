//! CLI argument definitions using clap
//!
//! Commands:
//! - pdstools schemas
//! - pdstools describe --schema <name>
//! - pdstools load --schema <name> --input <path> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pdstools - typed loading of ADM decisioning-model exports
#[derive(Parser, Debug)]
#[command(name = "pdstools")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only log warnings and errors
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the predefined schemas
    Schemas,

    /// Print the columns and declared types of a schema
    Describe {
        /// Schema name or alias
        #[arg(long)]
        schema: String,
    },

    /// Read an export, apply a schema and print a summary
    Load {
        /// Schema name or alias
        #[arg(long)]
        schema: String,

        /// Export file (.zip archive or NDJSON)
        #[arg(long)]
        input: PathBuf,

        /// Path to loader configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
