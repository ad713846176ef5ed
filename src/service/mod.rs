//! Query service: request intake, background scheduling and delivery
//!
//! [`AudioQueryService::query_audios`] resolves options, hands the plan to the
//! [`BackgroundOrchestrator`] and returns at once. The single reply travels
//! through the [`PendingCall`]; failures below the orchestrator are absorbed
//! and at worst turn into an empty record list.

mod call;
mod config;
mod errors;
mod orchestrator;
mod service;

pub use call::{CallReceiver, CallState, PendingCall, Reply};
pub use config::QueryConfig;
pub use errors::{DeliveryError, ServiceError, ServiceResult};
pub use orchestrator::{BackgroundOrchestrator, QueryTask};
pub use service::AudioQueryService;
