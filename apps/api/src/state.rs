use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::store::HubStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Saved list items and notes. `PgStore` in production.
    pub store: Arc<dyn HubStore>,
    /// Text generation backend. `GeminiClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
