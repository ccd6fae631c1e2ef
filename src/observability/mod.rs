//! Observability for pdstools
//!
//! Structured single-line JSON logs for lifecycle events. Logging is
//! read-only and never affects loader results.
//!
//! # Usage
//!
//! ```ignore
//! use pdstools::observability::{Logger, Severity, Event, log_event_with_fields};
//!
//! Logger::init(Severity::Info);
//! log_event_with_fields(Event::SourceRead, &[("rows", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields
///
/// Failure events are logged at ERROR, everything else at INFO.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::SourceRead, &[("path", "/tmp/data.json")]);
    }
}
