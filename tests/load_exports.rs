//! End-to-end loading of export files
//!
//! Builds small exports on disk in the platform's format (zip archive with a
//! `data.json` NDJSON member), reads them and applies the catalog schemas.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use pdstools::config::LoaderConfig;
use pdstools::schema::{catalog, LoadErrorCode, SchemaCaster};
use pdstools::table::{read_table, ColumnData, DataType};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const MODEL_EXPORT: &str = r#"{"pxApplication":"CDHSample","pyModelID":"bd70a915-697a-5d43-ab2c-53b0557c85a0","pyIssue":"Sales","pyGroup":"CreditCards","pyName":"AMEXPersonal","pyChannel":"Web","pyDirection":"Inbound","pySnapshotTime":"20210526T131808.371 GMT","pyPerformance":0.55,"pyPositives":12,"pyNegatives":140,"pyResponseCount":152,"pyActivePredictors":"8","pyTotalPredictors":"40","pyTreatment":null}
{"pxApplication":"CDHSample","pyModelID":"ff2a7d5e-8a07-5c9b-9f2a-1d2e3b4c5d6e","pyIssue":"Sales","pyGroup":"CreditCards","pyName":"UPlusGold","pyChannel":"Web","pyDirection":"Inbound","pySnapshotTime":"20210526T131808.371 GMT","pyPerformance":0.5,"pyPositives":0,"pyNegatives":3,"pyResponseCount":3,"pyActivePredictors":"0","pyTotalPredictors":"40","pyTreatment":null}
"#;

const BINNING_EXPORT: &str = r#"{"pyModelID":"bd70a915-697a-5d43-ab2c-53b0557c85a0","pyPredictorName":"Customer.Age","pyType":"numeric","pyBinIndex":1,"pyBinType":"INTERVAL","pyBinLowerBound":18,"pyBinUpperBound":25.5,"pyBinPositives":3,"pyBinNegatives":40,"pyLift":0.8,"pyZRatio":-1.2,"pyEntryType":"Active","pySnapshotTime":"20210526T131808.371 GMT"}
{"pyModelID":"bd70a915-697a-5d43-ab2c-53b0557c85a0","pyPredictorName":"Customer.Age","pyType":"numeric","pyBinIndex":2,"pyBinType":"INTERVAL","pyBinLowerBound":25.5,"pyBinUpperBound":60,"pyBinPositives":9,"pyBinNegatives":100,"pyLift":1.1,"pyZRatio":0.7,"pyEntryType":"Active","pySnapshotTime":"20210526T131808.371 GMT"}
"#;

fn write_export(dir: &Path, name: &str, records: &str) -> PathBuf {
    let path = dir.join(name);
    let mut writer = ZipWriter::new(File::create(&path).unwrap());
    writer
        .start_file("META-INF/MANIFEST.mf", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"Manifest-Version: 1.0\n").unwrap();
    writer
        .start_file("data.json", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(records.as_bytes()).unwrap();
    writer.finish().unwrap();
    path
}

#[test]
fn test_model_snapshot_export() {
    let dir = TempDir::new().unwrap();
    let path = write_export(
        dir.path(),
        "Data-Decision-ADM-ModelSnapshot_pyModelSnapshots_20210526T131808_GMT.zip",
        MODEL_EXPORT,
    );

    let raw = read_table(&path).unwrap();
    let config = LoaderConfig::default();
    let typed = SchemaCaster::new(&config)
        .apply_named(&raw, "ADMModelSnapshot")
        .unwrap();

    assert_eq!(typed.height(), 2);
    assert_eq!(typed.dtype("pyIssue"), Some(DataType::Categorical));
    assert_eq!(typed.dtype("pyModelID"), Some(DataType::Utf8));
    assert_eq!(typed.dtype("pySnapshotTime"), Some(DataType::Datetime));
    assert_eq!(typed.dtype("pyPerformance"), Some(DataType::Float64));
    assert_eq!(typed.dtype("pyPositives"), Some(DataType::Float32));
    assert_eq!(typed.dtype("pyTotalPredictors"), Some(DataType::UInt16));

    // All-null treatment column: declared type, no values.
    assert!(!raw.column_exists("pyTreatment"));
    assert_eq!(typed.dtype("pyTreatment"), Some(DataType::Utf8));
    assert_eq!(
        typed.column("pyTreatment").unwrap().data(),
        &ColumnData::Utf8(vec![None, None])
    );
    assert!(typed.column_exists("pyName"));

    assert_eq!(
        typed.column("pyActivePredictors").unwrap().data(),
        &ColumnData::UInt16(vec![Some(8), Some(0)])
    );
}

#[test]
fn test_predictor_binning_export() {
    let dir = TempDir::new().unwrap();
    let path = write_export(
        dir.path(),
        "Data-Decision-ADM-PredictorBinningSnapshot_pyADMPredictorSnapshots_20210526T133622_GMT.zip",
        BINNING_EXPORT,
    );

    let raw = read_table(&path).unwrap();
    let schema = catalog::lookup("predictorbinning").unwrap();
    let typed = pdstools::schema::apply_schema(&raw, schema).unwrap();

    assert_eq!(typed.dtype("pyBinIndex"), Some(DataType::UInt16));
    assert_eq!(typed.dtype("pyBinLowerBound"), Some(DataType::Float32));
    assert_eq!(typed.dtype("pyZRatio"), Some(DataType::Float64));
    assert_eq!(typed.dtype("pyPredictorName"), Some(DataType::Categorical));

    match typed.column("pyBinType").unwrap().data() {
        ColumnData::Categorical { categories, codes } => {
            assert_eq!(categories, &vec!["INTERVAL".to_string()]);
            assert_eq!(codes, &vec![Some(0), Some(0)]);
        }
        other => panic!("expected categorical, got {:?}", other),
    }
}

#[test]
fn test_wrong_schema_for_export_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trace.ndjson");
    std::fs::write(
        &path,
        "{\"pxRank\":\"1\",\"DecisionTime\":\"yesterday\"}\n",
    )
    .unwrap();

    let raw = read_table(&path).unwrap();
    let err = pdstools::schema::apply_schema(&raw, catalog::lookup("valuefinder").unwrap())
        .unwrap_err();
    assert_eq!(err.code(), LoadErrorCode::CastFailure);
    assert_eq!(err.column(), Some("DecisionTime"));
    assert_eq!(err.details().unwrap().value, "yesterday");
}

#[test]
fn test_null_issue_column_is_categorical() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("models.ndjson");
    std::fs::write(
        &path,
        "{\"pyModelID\":\"m1\",\"pyIssue\":null}\n{\"pyModelID\":\"m2\",\"pyIssue\":null}\n",
    )
    .unwrap();

    let raw = read_table(&path).unwrap();
    let typed = pdstools::schema::apply_schema(&raw, catalog::lookup("model").unwrap()).unwrap();
    assert_eq!(typed.dtype("pyIssue"), Some(DataType::Categorical));
    assert_eq!(typed.column("pyIssue").unwrap().data().null_count(), 2);
}

#[test]
fn test_missing_export_file() {
    let err = read_table(Path::new("/nonexistent/export.zip")).unwrap_err();
    assert_eq!(err.code(), LoadErrorCode::SourceError);
}
