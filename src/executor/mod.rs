//! Query executor subsystem
//!
//! Consumes a [`QueryPlan`](crate::planner::QueryPlan) and produces a
//! [`ResultCollection`]: every row is normalized by [`RowNormalizer`],
//! enriched by [`RecordEnricher`] and appended in cursor order.
//!
//! The executor is the boundary for source faults; nothing it encounters
//! propagates to the caller as an error.

mod columns;
mod enricher;
mod executor;
mod normalizer;
mod record;

pub use columns::{ColumnKind, ColumnKinds};
pub use enricher::{
    RecordEnricher, DISPLAY_NAME_WO_EXT_FIELD, ENRICHMENT_FIELDS, EXTENSION_FIELD, URI_FIELD,
};
pub use executor::{PartialResultPolicy, QueryExecutor};
pub use normalizer::RowNormalizer;
pub use record::{FieldValue, NormalizedRecord, ResultCollection};
