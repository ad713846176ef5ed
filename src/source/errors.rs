//! Data source errors
//!
//! None of these ever reach the caller: the executor absorbs them and the
//! caller sees an empty (or partial, if configured) result.

use thiserror::Error;

/// Result type for data source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// The media index could not be opened or faulted while being read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Column index {0} out of range")]
    ColumnOutOfRange(usize),

    #[error("Column '{column}' cannot be read as {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },

    #[error("Invalid filter pattern: {0}")]
    InvalidPattern(String),

    #[error("Cursor faulted: {0}")]
    Faulted(String),
}

impl SourceError {
    /// Stable error code used in log lines
    pub fn code(&self) -> &'static str {
        match self {
            SourceError::PermissionDenied(_) => "AUDIO_QUERY_PERMISSION_DENIED",
            SourceError::Unavailable(_) => "AUDIO_QUERY_SOURCE_UNAVAILABLE",
            SourceError::ColumnOutOfRange(_) | SourceError::TypeMismatch { .. } => {
                "AUDIO_QUERY_COLUMN_DECODE"
            }
            SourceError::InvalidPattern(_) => "AUDIO_QUERY_INVALID_PATTERN",
            SourceError::Faulted(_) => "AUDIO_QUERY_CURSOR_FAULTED",
        }
    }

    /// True when the failure is confined to one column of one row
    pub fn is_column_local(&self) -> bool {
        matches!(
            self,
            SourceError::ColumnOutOfRange(_) | SourceError::TypeMismatch { .. }
        )
    }
}
