//! Option resolver errors
//!
//! Every variant rejects the request before any background work starts.

use thiserror::Error;

/// Result type for plan construction
pub type PlannerResult<T> = Result<T, OptionError>;

/// A caller-supplied option could not be turned into a query plan
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("Unknown sort type code: {0}")]
    UnknownSortType(i64),

    #[error("Unknown order type code: {0}")]
    UnknownOrderType(i64),

    #[error("Unknown uri type code: {0} (expected 0 = external, 1 = internal)")]
    UnknownScope(i64),

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

impl OptionError {
    /// Stable error code reported back to the caller
    pub fn code(&self) -> &'static str {
        "AUDIO_QUERY_INVALID_OPTION"
    }

    /// Name of the offending argument
    pub fn argument(&self) -> &'static str {
        match self {
            OptionError::UnknownSortType(_) => "sortType",
            OptionError::UnknownOrderType(_) => "orderType",
            OptionError::UnknownScope(_) => "uri",
            OptionError::MissingArgument(name) | OptionError::InvalidArgument { name, .. } => {
                *name
            }
        }
    }
}
