use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::gateway::GeminiClient;
use crate::store::EngineState;

/// Shared application state injected into all route handlers via Axum
/// extractors. The whole engine lives behind one lock; handlers hold it
/// only across synchronous mutations, never across a gateway await.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<EngineState>>,
    pub ai: GeminiClient,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            engine: Arc::new(RwLock::new(EngineState::new())),
            ai: GeminiClient::new(config.gemini_api_key.clone()),
            config,
        }
    }
}
