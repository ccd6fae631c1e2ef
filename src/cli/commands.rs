//! CLI command implementations
//!
//! Commands build a JSON value; `run_command` writes it to stdout.

use std::path::Path;

use serde_json::{json, Value};

use crate::config::LoaderConfig;
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::schema::{catalog, LoadError, LoadErrorCode, SchemaCaster, SchemaDefinition};
use crate::table::{read_table, TypedTable};

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments, initializes logging and dispatches the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    Logger::init(if cli.quiet {
        Severity::Warn
    } else {
        Severity::Info
    });
    run_command(cli.command)
}

/// Run the appropriate command and write its result
pub fn run_command(cmd: Command) -> CliResult<()> {
    let data = match cmd {
        Command::Schemas => schemas(),
        Command::Describe { schema } => describe(&schema)?,
        Command::Load {
            schema,
            input,
            config,
        } => load(&schema, &input, config.as_deref())?,
    };
    write_response(data)
}

/// Lists the catalog
pub fn schemas() -> Value {
    let entries: Vec<Value> = catalog::all()
        .iter()
        .map(|schema| {
            json!({
                "name": schema.name(),
                "aliases": schema.aliases(),
                "columns": schema.len(),
            })
        })
        .collect();
    json!({ "schemas": entries })
}

/// Describes one schema's columns in declaration order
pub fn describe(schema_name: &str) -> CliResult<Value> {
    let schema = resolve(schema_name)?;
    let columns: Vec<Value> = schema
        .iter()
        .map(|(name, column_type)| json!({ "name": name, "type": column_type }))
        .collect();
    Ok(json!({
        "name": schema.name(),
        "columns": columns,
    }))
}

/// Reads `input`, applies the schema and summarizes the typed table
pub fn load(schema_name: &str, input: &Path, config_path: Option<&Path>) -> CliResult<Value> {
    let config = match config_path {
        Some(path) => {
            let config = LoaderConfig::load(path)?;
            log_event_with_fields(
                Event::ConfigLoaded,
                &[("path", &path.display().to_string())],
            );
            config
        }
        None => LoaderConfig::default(),
    };

    let schema = resolve(schema_name)?;
    let raw = read_table(input)?;

    let typed = SchemaCaster::new(&config)
        .apply_schema(&raw, schema)
        .map_err(|e| {
            if e.code() == LoadErrorCode::CastFailure {
                log_event_with_fields(
                    Event::CastFailed,
                    &[
                        ("column", e.column().unwrap_or_default()),
                        ("source", &input.display().to_string()),
                    ],
                );
            }
            e
        })?;

    let mut summary = summarize(&typed, schema);
    summary["source"] = json!(input.display().to_string());
    Ok(summary)
}

/// Summarizes a typed table against the schema that produced it
pub fn summarize(table: &TypedTable, schema: &SchemaDefinition) -> Value {
    let columns: Vec<Value> = table
        .columns()
        .iter()
        .map(|column| {
            json!({
                "name": column.name(),
                "dtype": column.dtype(),
                "declared": schema.get(column.name()),
                "nulls": column.data().null_count(),
            })
        })
        .collect();

    let missing: Vec<&str> = schema
        .iter()
        .map(|(name, _)| name)
        .filter(|name| table.column(name).is_none())
        .collect();

    json!({
        "schema": schema.name(),
        "rows": table.height(),
        "columns": columns,
        "missing": missing,
    })
}

fn resolve(schema_name: &str) -> Result<&'static SchemaDefinition, LoadError> {
    catalog::lookup(schema_name).map_err(|e| {
        log_event_with_fields(Event::SchemaNotFound, &[("schema", schema_name)]);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_schemas_lists_catalog() {
        let value = schemas();
        let entries = value["schemas"].as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["name"], "ADMModelSnapshot");
        assert_eq!(entries[0]["columns"], 34);
    }

    #[test]
    fn test_describe_keeps_order() {
        let value = describe("valuefinder").unwrap();
        assert_eq!(value["name"], "pyValueFinder");
        let columns = value["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 18);
        assert_eq!(columns[0]["name"], "pyDirection");
        assert_eq!(columns[0]["type"], "Categorical");
        assert_eq!(columns[2]["type"], "UInt32");
    }

    #[test]
    fn test_describe_unknown_schema() {
        let err = describe("HealthCheck").unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::LoadFailed);
        assert!(err.message().contains("PDS_SCHEMA_NOT_FOUND"));
    }

    #[test]
    fn test_load_summarizes_table() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("models.json");
        std::fs::write(
            &input,
            "{\"pyModelID\":\"m1\",\"pyPositives\":\"3\",\"custom\":1}\n\
             {\"pyModelID\":\"m2\",\"pyPositives\":\"\",\"custom\":2}\n",
        )
        .unwrap();

        let value = load("model", &input, None).unwrap();
        assert_eq!(value["schema"], "ADMModelSnapshot");
        assert_eq!(value["rows"], 2);

        let columns = value["columns"].as_array().unwrap();
        assert_eq!(columns[1]["name"], "pyPositives");
        assert_eq!(columns[1]["dtype"], "Float32");
        assert_eq!(columns[1]["nulls"], 1);
        assert_eq!(columns[2]["dtype"], "Int64");
        assert!(columns[2]["declared"].is_null());

        let missing = value["missing"].as_array().unwrap();
        assert_eq!(missing.len(), 32);
        assert!(missing.iter().any(|m| m == "pySnapshotTime"));
    }

    #[test]
    fn test_load_with_bad_config() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("pdstools.json");
        std::fs::write(&config, r#"{"datetime_formats": []}"#).unwrap();

        let err = load("model", &dir.path().join("x.json"), Some(&config)).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_load_cast_failure() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("models.json");
        std::fs::write(&input, "{\"pyTotalPredictors\":\"lots\"}\n").unwrap();

        let err = load("model", &input, None).unwrap_err();
        assert!(err.message().contains("PDS_CAST_FAILURE"));
        assert!(err.message().contains("pyTotalPredictors"));
    }
}
