//! Shared state for the HTTP server.

use std::sync::Arc;
use std::time::Instant;

use comply_core::AppConfig;
use comply_knowledge::ComplianceStore;
use comply_llm::CompletionClient;

use crate::service::AnswerService;

/// Shared state handed to every request handler.
pub struct AppState {
    /// Resolved application configuration
    pub config: AppConfig,

    /// Compliance record store
    pub store: Arc<ComplianceStore>,

    /// Completion gateway client
    pub client: Arc<dyn CompletionClient>,

    /// The answer pipeline
    pub service: AnswerService,

    /// Process start time, for uptime reporting
    pub start_time: Instant,
}
