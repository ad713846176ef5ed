//! Media index access
//!
//! The traits here are the only way the pipeline touches the data source;
//! the source is injected per service, never looked up globally.
//! [`MemorySource`] is a complete in-memory index for hosts and tests.

mod cursor;
mod errors;
mod like;
mod memory;

pub use cursor::{Cursor, CursorGuard, MediaSource, RawRow};
pub use errors::{SourceError, SourceResult};
pub use like::LikeMatcher;
pub use memory::{Cell, MediaRow, MemorySource};
