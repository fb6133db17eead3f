use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; each request gets a cheap clone.
#[derive(Clone)]
pub struct AppState {
    /// The only path to a model provider. `LlmClient` in production, a stub in tests.
    pub llm: Arc<dyn CompletionClient>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(llm: Arc<dyn CompletionClient>, config: Config) -> Self {
        Self {
            llm,
            config: Arc::new(config),
        }
    }
}
