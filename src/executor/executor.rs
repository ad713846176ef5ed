//! Query executor
//!
//! Execution flow:
//! 1. Open a cursor for the plan (failure → empty result)
//! 2. For each row: normalize, enrich, merge, append
//! 3. Release the cursor on every exit path
//! 4. A mid-stream fault yields an empty or partial result per policy
//!
//! A panic raised by the source (while opening, advancing or decoding a row)
//! is caught here and handled like a mid-stream fault.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::planner::QueryPlan;
use crate::source::{CursorGuard, MediaSource, SourceError};

use super::enricher::RecordEnricher;
use super::normalizer::RowNormalizer;
use super::record::ResultCollection;

/// What to return when the cursor faults after some rows were read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialResultPolicy {
    /// Return an empty collection
    #[default]
    Discard,
    /// Return the rows read before the fault
    Keep,
}

/// Runs plans against a media source
pub struct QueryExecutor<'a> {
    source: &'a dyn MediaSource,
    policy: PartialResultPolicy,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(source: &'a dyn MediaSource) -> Self {
        Self {
            source,
            policy: PartialResultPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PartialResultPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Executes `plan`. Never fails: source errors degrade to an empty
    /// collection (or a partial one under [`PartialResultPolicy::Keep`]).
    pub fn execute(&self, plan: &QueryPlan) -> ResultCollection {
        self.execute_with_id(plan, "-")
    }

    /// Same as [`execute`](Self::execute), tagging log lines with `request_id`
    pub fn execute_with_id(&self, plan: &QueryPlan, request_id: &str) -> ResultCollection {
        let scope = ObservationScope::with_fields("QUERY", &[("request_id", request_id)]);
        let mut collection = ResultCollection::empty();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.fill(plan, &mut collection)))
            .unwrap_or_else(|payload| {
                Err((Stage::Iterate, SourceError::Faulted(panic_message(payload.as_ref()))))
            });

        match outcome {
            Ok(()) => {
                let rows = collection.len().to_string();
                scope.complete_with_fields(&[("rows", rows.as_str())]);
                collection
            }
            Err((stage, e)) => {
                let event = match stage {
                    Stage::Open => Event::CursorOpenFailed,
                    Stage::Iterate => Event::CursorFaulted,
                };
                let reason = e.to_string();
                let accumulated = collection.len().to_string();
                log_event_with_fields(
                    event,
                    &[
                        ("request_id", request_id),
                        ("code", e.code()),
                        ("reason", reason.as_str()),
                        ("rows_read", accumulated.as_str()),
                    ],
                );
                scope.fail(&reason);

                match (stage, self.policy) {
                    (Stage::Iterate, PartialResultPolicy::Keep) => collection,
                    _ => ResultCollection::empty(),
                }
            }
        }
    }

    fn fill(
        &self,
        plan: &QueryPlan,
        collection: &mut ResultCollection,
    ) -> Result<(), (Stage, SourceError)> {
        let cursor = self.source.open(plan).map_err(|e| (Stage::Open, e))?;
        let mut cursor = CursorGuard::new(cursor);

        let count = cursor
            .count()
            .map_or_else(|| "unknown".to_string(), |c| c.to_string());
        log_event_with_fields(Event::CursorOpened, &[("count", count.as_str())]);

        let normalizer = RowNormalizer::new(plan);
        while let Some(row) = cursor.advance().map_err(|e| (Stage::Iterate, e))? {
            let mut record = normalizer.normalize(row);
            let extra = RecordEnricher::enrich(plan.scope, &record);
            record.merge(extra);
            collection.push(record);
        }

        cursor.close();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Open,
    Iterate,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("source panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("source panicked: {}", message)
    } else {
        "source panicked".to_string()
    }
}
