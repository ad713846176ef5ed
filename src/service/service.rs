//! Host entry point for audio queries

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::observability::{log_event_with_fields, Event};
use crate::planner::{CallArguments, QueryOptions, QueryPlanner};
use crate::source::MediaSource;

use super::call::PendingCall;
use super::config::QueryConfig;
use super::errors::ServiceResult;
use super::orchestrator::{BackgroundOrchestrator, QueryTask};

/// Answers audio queries against one media source
pub struct AudioQueryService {
    orchestrator: BackgroundOrchestrator,
    config: QueryConfig,
}

impl AudioQueryService {
    /// Creates a service scheduling its work on `runtime`
    pub fn new(source: Arc<dyn MediaSource>, runtime: Handle, config: QueryConfig) -> Self {
        Self {
            orchestrator: BackgroundOrchestrator::new(source, runtime)
                .with_policy(config.partial_results),
            config,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Queries all audio tracks matching `args` and answers `call` in the
    /// background with the (possibly empty) list of records.
    ///
    /// Invalid options are rejected before anything is scheduled: `call` is
    /// answered with an `INVALID_OPTION` style error and the error is returned.
    pub fn query_audios(&self, args: &CallArguments, call: PendingCall) -> ServiceResult<QueryTask> {
        let request_id = call.id().to_string();

        let plan = match QueryOptions::from_arguments(args).and_then(|o| QueryPlanner::plan(&o)) {
            Ok(plan) => plan,
            Err(e) => {
                let message = e.to_string();
                log_event_with_fields(
                    Event::QueryOptionRejected,
                    &[
                        ("request_id", request_id.as_str()),
                        ("argument", e.argument()),
                        ("reason", message.as_str()),
                    ],
                );
                if let Err(delivery) = call.error(e.code(), &message) {
                    log_event_with_fields(
                        Event::DeliverySkipped,
                        &[("request_id", request_id.as_str()), ("code", delivery.code())],
                    );
                }
                return Err(e.into());
            }
        };

        if self.config.log_query_config {
            let sort = plan.sort_clause();
            let selection = plan.selection().unwrap_or_else(|| "null".to_string());
            log_event_with_fields(
                Event::QueryConfigResolved,
                &[
                    ("request_id", request_id.as_str()),
                    ("sort", sort.as_str()),
                    ("selection", selection.as_str()),
                    ("uri", plan.scope.content_uri()),
                ],
            );
        }

        Ok(self.orchestrator.run(plan, call))
    }
}
