//! Observable events in the query pipeline
//!
//! Events are explicit and typed; the string form is what lands in the log line.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Request intake
    /// Options decoded and plan built
    QueryConfigResolved,
    /// Options rejected before any background work
    QueryOptionRejected,
    /// Plan handed to the background worker
    QueryScheduled,

    // Source access
    /// Cursor opened against the source
    CursorOpened,
    /// Source could not be opened (permission, absent provider)
    CursorOpenFailed,
    /// Cursor faulted while advancing
    CursorFaulted,
    /// Cursor released
    CursorClosed,
    /// One column could not be decoded; stored as null
    ColumnDecodeFailed,

    // Delivery
    /// Result delivered to the pending call
    ResultDelivered,
    /// Pending call already resolved or receiver gone
    DeliverySkipped,
    /// Background task panicked or was aborted
    BackgroundTaskFailed,
}

impl Event {
    /// Returns the event name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::QueryConfigResolved => "QUERY_CONFIG_RESOLVED",
            Event::QueryOptionRejected => "QUERY_OPTION_REJECTED",
            Event::QueryScheduled => "QUERY_SCHEDULED",
            Event::CursorOpened => "CURSOR_OPENED",
            Event::CursorOpenFailed => "CURSOR_OPEN_FAILED",
            Event::CursorFaulted => "CURSOR_FAULTED",
            Event::CursorClosed => "CURSOR_CLOSED",
            Event::ColumnDecodeFailed => "COLUMN_DECODE_FAILED",
            Event::ResultDelivered => "RESULT_DELIVERED",
            Event::DeliverySkipped => "DELIVERY_SKIPPED",
            Event::BackgroundTaskFailed => "BACKGROUND_TASK_FAILED",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::CursorClosed => Severity::Trace,
            Event::QueryConfigResolved | Event::QueryScheduled | Event::CursorOpened => {
                Severity::Debug
            }
            Event::ResultDelivered => Severity::Info,
            Event::QueryOptionRejected
            | Event::ColumnDecodeFailed
            | Event::DeliverySkipped => Severity::Warn,
            Event::CursorOpenFailed | Event::CursorFaulted | Event::BackgroundTaskFailed => {
                Severity::Error
            }
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
