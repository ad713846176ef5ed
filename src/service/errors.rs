//! Service and delivery errors

use thiserror::Error;

use crate::planner::OptionError;

use super::call::CallState;

/// Result type for the host entry point
pub type ServiceResult<T> = Result<T, ServiceError>;

/// A reply could not be handed to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("Reply already submitted (call is {0:?})")]
    AlreadyResolved(CallState),

    #[error("Caller is no longer waiting for a reply")]
    Disconnected,
}

impl DeliveryError {
    pub fn code(&self) -> &'static str {
        match self {
            DeliveryError::AlreadyResolved(_) => "AUDIO_QUERY_ALREADY_REPLIED",
            DeliveryError::Disconnected => "AUDIO_QUERY_CALLER_GONE",
        }
    }
}

/// Errors the host entry point reports synchronously
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidOption(#[from] OptionError),

    #[error("Failed to start worker runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
