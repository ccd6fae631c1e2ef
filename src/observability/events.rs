//! Observability events for pdstools
//!
//! Every structured log line carries exactly one of these events.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Loader configuration read from disk
    ConfigLoaded,

    // Sources
    /// Raw table decoded from a file or archive
    SourceRead,
    /// Raw source could not be decoded
    SourceFailed,

    // Schema application
    /// Schema applied to a raw table
    SchemaApplied,
    /// A declared column failed to cast
    CastFailed,
    /// Unknown schema requested
    SchemaNotFound,
}

impl Event {
    /// Returns the event name as written to the log
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SourceRead => "SOURCE_READ",
            Event::SourceFailed => "SOURCE_FAILED",
            Event::SchemaApplied => "SCHEMA_APPLIED",
            Event::CastFailed => "CAST_FAILED",
            Event::SchemaNotFound => "SCHEMA_NOT_FOUND",
        }
    }

    /// Whether the event reports a failed operation
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::SourceFailed | Event::CastFailed | Event::SchemaNotFound
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
