//! pdstools - typed loading of ADM decisioning-model exports
//!
//! Reads model snapshot, predictor binning and value finder exports and
//! casts them to the platform's declared column types.

pub mod cli;
pub mod config;
pub mod observability;
pub mod schema;
pub mod table;
