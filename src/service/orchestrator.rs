//! Background orchestrator
//!
//! Runs the executor on tokio's blocking pool and makes exactly one delivery
//! attempt per request. Source faults and panics are absorbed by the
//! executor; a join error here means the worker never ran to completion
//! (runtime shutdown).

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::executor::{PartialResultPolicy, QueryExecutor, ResultCollection};
use crate::observability::{log_event_with_fields, Event};
use crate::planner::QueryPlan;
use crate::source::MediaSource;

use super::call::PendingCall;

/// Handle to one scheduled query. Dropping it does not cancel the query.
#[derive(Debug)]
pub struct QueryTask {
    request_id: Uuid,
    handle: JoinHandle<()>,
}

impl QueryTask {
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits until the query has run and its delivery attempt was made
    pub async fn finished(self) {
        // The task body absorbs its own failures; a join error here can only
        // mean the runtime shut down.
        let _ = self.handle.await;
    }
}

/// Schedules queries off the calling thread
pub struct BackgroundOrchestrator {
    source: Arc<dyn MediaSource>,
    runtime: Handle,
    policy: PartialResultPolicy,
}

impl BackgroundOrchestrator {
    pub fn new(source: Arc<dyn MediaSource>, runtime: Handle) -> Self {
        Self {
            source,
            runtime,
            policy: PartialResultPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PartialResultPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Starts `plan` in the background and returns immediately.
    ///
    /// The outcome only ever reaches the caller through `call`.
    pub fn run(&self, plan: QueryPlan, call: PendingCall) -> QueryTask {
        let request_id = call.id();
        let id = request_id.to_string();
        log_event_with_fields(Event::QueryScheduled, &[("request_id", id.as_str())]);

        let source = Arc::clone(&self.source);
        let policy = self.policy;
        let runtime = self.runtime.clone();

        let handle = self.runtime.spawn(async move {
            let worker_id = id.clone();
            let work = runtime.spawn_blocking(move || {
                QueryExecutor::new(source.as_ref())
                    .with_policy(policy)
                    .execute_with_id(&plan, &worker_id)
            });

            match work.await {
                Ok(collection) => Self::deliver(&call, collection, &id),
                Err(e) => {
                    let reason = if e.is_panic() {
                        "query worker panicked"
                    } else {
                        "query worker cancelled"
                    };
                    log_event_with_fields(
                        Event::BackgroundTaskFailed,
                        &[("request_id", id.as_str()), ("reason", reason)],
                    );
                }
            }
        });

        QueryTask { request_id, handle }
    }

    fn deliver(call: &PendingCall, collection: ResultCollection, request_id: &str) {
        let rows = collection.len().to_string();
        let value = collection.to_json().unwrap_or_else(|e| {
            let reason = e.to_string();
            log_event_with_fields(
                Event::BackgroundTaskFailed,
                &[("request_id", request_id), ("reason", reason.as_str())],
            );
            serde_json::Value::Array(Vec::new())
        });
        match call.success(value) {
            Ok(()) => log_event_with_fields(
                Event::ResultDelivered,
                &[("request_id", request_id), ("rows", rows.as_str())],
            ),
            Err(e) => {
                let reason = e.to_string();
                log_event_with_fields(
                    Event::DeliverySkipped,
                    &[
                        ("request_id", request_id),
                        ("code", e.code()),
                        ("reason", reason.as_str()),
                    ],
                );
            }
        }
    }
}
