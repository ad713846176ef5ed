//! Data-source scope selection

use std::fmt;

use super::errors::{OptionError, PlannerResult};

/// Which logical volume of the media index a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaScope {
    /// Shared/external storage
    External,
    /// Device internal storage
    Internal,
}

impl MediaScope {
    /// Resolves a `uri` option code: 0 = external, 1 = internal
    pub fn from_code(code: i64) -> PlannerResult<Self> {
        match code {
            0 => Ok(MediaScope::External),
            1 => Ok(MediaScope::Internal),
            other => Err(OptionError::UnknownScope(other)),
        }
    }

    /// Content locator of the audio table for this scope
    pub fn content_uri(&self) -> &'static str {
        match self {
            MediaScope::External => "content://media/external/audio/media",
            MediaScope::Internal => "content://media/internal/audio/media",
        }
    }
}

impl fmt::Display for MediaScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content_uri())
    }
}
