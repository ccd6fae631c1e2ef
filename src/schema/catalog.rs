//! Catalog of the predefined export schemas
//!
//! Column names and types mirror the platform's export format exactly and
//! must not be edited without a matching upstream change:
//! - ADMModelSnapshot: one row per model per snapshot
//! - ADMPredictorBinningSnapshot: one row per predictor bin per snapshot
//! - pyValueFinder: one row per decision stage per subject

use super::errors::{LoadError, LoadResult};
use super::types::ColumnType::{Categorical, Datetime, Float32, Float64, UInt16, UInt32, Utf8};
use super::types::{ColumnDef, SchemaDefinition};

const ADM_MODEL_SNAPSHOT_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("pxApplication", Categorical),
    ColumnDef::new("pyAppliesToClass", Categorical),
    ColumnDef::new("pyModelID", Utf8),
    ColumnDef::new("pyConfigurationName", Categorical),
    ColumnDef::new("pySnapshotTime", Datetime),
    ColumnDef::new("pyIssue", Categorical),
    ColumnDef::new("pyGroup", Categorical),
    ColumnDef::new("pyName", Utf8),
    ColumnDef::new("pyChannel", Categorical),
    ColumnDef::new("pyDirection", Categorical),
    ColumnDef::new("pyTreatment", Utf8),
    ColumnDef::new("pyPerformance", Float64),
    ColumnDef::new("pySuccessRate", Float64),
    ColumnDef::new("pyResponseCount", Float32),
    ColumnDef::new("pxObjClass", Categorical),
    ColumnDef::new("pzInsKey", Utf8),
    ColumnDef::new("pxInsName", Utf8),
    ColumnDef::new("pxSaveDateTime", Datetime),
    ColumnDef::new("pxCommitDateTime", Datetime),
    ColumnDef::new("pyExtension", Utf8),
    ColumnDef::new("pyActivePredictors", UInt16),
    ColumnDef::new("pyTotalPredictors", UInt16),
    ColumnDef::new("pyNegatives", Float32),
    ColumnDef::new("pyPositives", Float32),
    ColumnDef::new("pyRelativeNegatives", Float32),
    ColumnDef::new("pyRelativePositives", Float32),
    ColumnDef::new("pyRelativeResponseCount", Float32),
    ColumnDef::new("pyMemory", Utf8),
    ColumnDef::new("pyPerformanceThreshold", Float32),
    ColumnDef::new("pyCorrelationThreshold", Float32),
    ColumnDef::new("pyPerformanceError", Float32),
    ColumnDef::new("pyModelData", Utf8),
    ColumnDef::new("pyModelVersion", Utf8),
    ColumnDef::new("pyFactoryUpdatetime", Datetime),
];

const ADM_PREDICTOR_BINNING_SNAPSHOT_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("pxCommitDateTime", Datetime),
    ColumnDef::new("pxSaveDateTime", Datetime),
    ColumnDef::new("pyModelID", Utf8),
    ColumnDef::new("pxObjClass", Categorical),
    ColumnDef::new("pzInsKey", Utf8),
    ColumnDef::new("pxInsName", Utf8),
    ColumnDef::new("pyPredictorName", Categorical),
    ColumnDef::new("pyContents", Utf8),
    ColumnDef::new("pyPerformance", Float64),
    ColumnDef::new("pyPositives", Float32),
    ColumnDef::new("pyNegatives", Float32),
    ColumnDef::new("pyType", Categorical),
    ColumnDef::new("pyTotalBins", UInt16),
    ColumnDef::new("pyResponseCount", Float32),
    ColumnDef::new("pyRelativePositives", Float32),
    ColumnDef::new("pyRelativeNegatives", Float32),
    ColumnDef::new("pyRelativeResponseCount", Float32),
    ColumnDef::new("pyBinNegatives", Float32),
    ColumnDef::new("pyBinPositives", Float32),
    ColumnDef::new("pyBinType", Categorical),
    ColumnDef::new("pyBinNegativesPercentage", Float32),
    ColumnDef::new("pyBinPositivesPercentage", Float32),
    ColumnDef::new("pyBinSymbol", Utf8),
    ColumnDef::new("pyBinLowerBound", Float32),
    ColumnDef::new("pyBinUpperBound", Float32),
    ColumnDef::new("pyRelativeBinPositives", Float32),
    ColumnDef::new("pyRelativeBinNegatives", Float32),
    ColumnDef::new("pyBinResponseCount", Float32),
    ColumnDef::new("pyRelativeBinResponseCount", Float32),
    ColumnDef::new("pyBinResponseCountPercentage", Float32),
    ColumnDef::new("pySnapshotTime", Datetime),
    ColumnDef::new("pyBinIndex", UInt16),
    ColumnDef::new("pyLift", Float64),
    ColumnDef::new("pyZRatio", Float64),
    ColumnDef::new("pyEntryType", Categorical),
    ColumnDef::new("pyExtension", Utf8),
    ColumnDef::new("pyGroupIndex", UInt16),
    ColumnDef::new("pyCorrelationPredictor", Float32),
];

const PY_VALUE_FINDER_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("pyDirection", Categorical),
    ColumnDef::new("pySubjectType", Categorical),
    ColumnDef::new("ModelPositives", UInt32),
    ColumnDef::new("pyGroup", Categorical),
    ColumnDef::new("pyPropensity", Float64),
    ColumnDef::new("FinalPropensity", Float64),
    ColumnDef::new("pyStage", Categorical),
    ColumnDef::new("pxRank", UInt16),
    ColumnDef::new("pxPriority", Float64),
    ColumnDef::new("pyModelPropensity", Float64),
    ColumnDef::new("pyChannel", Categorical),
    ColumnDef::new("Value", Float64),
    ColumnDef::new("pyName", Utf8),
    ColumnDef::new("StartingEvidence", UInt32),
    ColumnDef::new("pySubjectID", Utf8),
    ColumnDef::new("DecisionTime", Datetime),
    ColumnDef::new("pyTreatment", Utf8),
    ColumnDef::new("pyIssue", Categorical),
];

/// Model snapshot table (`Data-Decision-ADM-ModelSnapshot`)
pub static ADM_MODEL_SNAPSHOT: SchemaDefinition = SchemaDefinition::new(
    "ADMModelSnapshot",
    &["model", "modeldata", "modelsnapshot"],
    ADM_MODEL_SNAPSHOT_COLUMNS,
);

/// Predictor binning table (`Data-Decision-ADM-PredictorBinningSnapshot`)
pub static ADM_PREDICTOR_BINNING_SNAPSHOT: SchemaDefinition = SchemaDefinition::new(
    "ADMPredictorBinningSnapshot",
    &["predictor", "predictorbinning", "predictordata"],
    ADM_PREDICTOR_BINNING_SNAPSHOT_COLUMNS,
);

/// Value finder decision trace
pub static PY_VALUE_FINDER: SchemaDefinition = SchemaDefinition::new(
    "pyValueFinder",
    &["valuefinder", "vf"],
    PY_VALUE_FINDER_COLUMNS,
);

static CATALOG: [&SchemaDefinition; 3] = [
    &ADM_MODEL_SNAPSHOT,
    &ADM_PREDICTOR_BINNING_SNAPSHOT,
    &PY_VALUE_FINDER,
];

/// All predefined schemas, in catalog order.
pub fn all() -> &'static [&'static SchemaDefinition] {
    &CATALOG
}

/// Resolves a schema by canonical name or alias (case-insensitive).
///
/// # Errors
///
/// Returns `PDS_SCHEMA_NOT_FOUND` if nothing in the catalog matches.
pub fn lookup(name: &str) -> LoadResult<&'static SchemaDefinition> {
    let name = name.trim();
    CATALOG
        .iter()
        .copied()
        .find(|schema| schema.matches(name))
        .ok_or_else(|| LoadError::schema_not_found(name))
}
