//! Option resolver
//!
//! Turns the caller's named options into an immutable [`QueryPlan`]:
//!
//! - `sortType` / `orderType` / `ignoreCase` → sort clause
//! - `uri` → scope (0 = external, 1 = internal)
//! - `path` → directory row filter on the primary path column
//!
//! Unknown codes fail with [`OptionError`] before any background work is
//! scheduled. Plan construction has no side effects.

mod errors;
mod filter;
mod options;
mod planner;
mod scope;
mod sort;

pub use errors::{OptionError, PlannerResult};
pub use filter::{RowFilter, LIKE_ESCAPE};
pub use options::{CallArguments, QueryOptions};
pub use planner::{QueryPlan, QueryPlanner, AUDIO_PROJECTION};
pub use scope::MediaScope;
pub use sort::{SongSortType, SortDirection, SortOrder};
