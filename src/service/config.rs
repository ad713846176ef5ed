//! Query service configuration

use serde::{Deserialize, Serialize};
use tokio::runtime::{Builder, Runtime};

use crate::executor::PartialResultPolicy;

/// Configuration for the audio query service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Result returned when the cursor faults mid-stream (default: discard)
    #[serde(default)]
    pub partial_results: PartialResultPolicy,

    /// Async worker threads of a service-owned runtime (default: 1)
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    /// Upper bound on concurrently running queries (default: 8)
    #[serde(default = "default_max_blocking_threads")]
    pub max_blocking_threads: usize,

    /// Thread name prefix of a service-owned runtime
    #[serde(default = "default_thread_name")]
    pub thread_name: String,

    /// Log the resolved sort clause, selection and uri of every query (default: true)
    #[serde(default = "default_log_query_config")]
    pub log_query_config: bool,
}

fn default_worker_threads() -> usize {
    1
}

fn default_max_blocking_threads() -> usize {
    8
}

fn default_thread_name() -> String {
    "mediaquery-worker".to_string()
}

fn default_log_query_config() -> bool {
    true
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            partial_results: PartialResultPolicy::default(),
            worker_threads: default_worker_threads(),
            max_blocking_threads: default_max_blocking_threads(),
            thread_name: default_thread_name(),
            log_query_config: default_log_query_config(),
        }
    }
}

impl QueryConfig {
    /// Config that keeps rows read before a cursor fault
    pub fn keep_partial_results() -> Self {
        Self {
            partial_results: PartialResultPolicy::Keep,
            ..Self::default()
        }
    }

    /// Builds a dedicated runtime for hosts that do not run tokio themselves.
    ///
    /// Thread counts of zero are raised to one.
    pub fn build_runtime(&self) -> std::io::Result<Runtime> {
        Builder::new_multi_thread()
            .worker_threads(self.worker_threads.max(1))
            .max_blocking_threads(self.max_blocking_threads.max(1))
            .thread_name(self.thread_name.clone())
            .enable_all()
            .build()
    }
}
