//! Observability for the query pipeline
//!
//! - Structured JSON log lines forwarded to the `log` facade
//! - Typed lifecycle events
//! - Scope-based begin/complete logging
//!
//! Observability never changes what a caller receives: every helper here
//! swallows its own failures.
//!
//! ```ignore
//! use mediaquery::observability::{log_event_with_fields, Event, ObservationScope};
//!
//! log_event_with_fields(Event::CursorOpened, &[("count", "42")]);
//!
//! let scope = ObservationScope::with_fields("QUERY", &[("request_id", "…")]);
//! scope.complete_with_fields(&[("rows", "42")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity, LOG_TARGET};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
