//! mediaquery - background queries over a device audio media index
//!
//! Pipeline, leaf to root:
//!
//! - [`planner`]: caller options → immutable query plan
//! - [`source`]: media index interface and an in-memory index
//! - [`executor`]: cursor iteration, row normalization, enrichment
//! - [`service`]: background scheduling and single delivery to the caller
//! - [`observability`]: structured log lines

pub mod executor;
pub mod observability;
pub mod planner;
pub mod service;
pub mod source;

pub use executor::{FieldValue, NormalizedRecord, PartialResultPolicy, ResultCollection};
pub use planner::{CallArguments, MediaScope, OptionError, QueryPlan, QueryPlanner};
pub use service::{AudioQueryService, PendingCall, QueryConfig, Reply};
pub use source::{MediaSource, MemorySource};
