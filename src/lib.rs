/*
 * Core library module for the response generator, organizing all
 * modules and exposing the public API.
 */

pub mod models;
pub mod persistence;
pub mod services;
pub mod utils;

pub use utils::{Config, ResponseGenError, Result};

use std::sync::Arc;

use persistence::Persistence;
use services::CacheOrchestrator;

/// Composition root: the config snapshot and the orchestrator built on
/// top of a caller-supplied `Persistence` implementation. A transport
/// (out of scope for this crate) would hold one of these per process
/// and call `orchestrator` for every request.
pub struct AppState {
    pub config: Arc<Config>,
    pub orchestrator: CacheOrchestrator,
}

impl AppState {
    pub fn new(config: Config, persistence: Arc<dyn Persistence>) -> Self {
        let config = Arc::new(config);
        let orchestrator = CacheOrchestrator::new(config.clone(), persistence);
        Self { config, orchestrator }
    }
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const BUILD_TIME: &str = env!("BUILD_TIME");
pub const GIT_COMMIT: &str = env!("GIT_COMMIT");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::fake::InMemoryPersistence;
    use crate::utils::ConfigBuilder;

    #[tokio::test]
    async fn app_state_wires_orchestrator_to_config() {
        let config = ConfigBuilder::new().build();
        let state = AppState::new(config, Arc::new(InMemoryPersistence::new()));

        let bytes = state
            .orchestrator
            .generate_post_response(crate::models::EntityKind::Board, &[])
            .await
            .unwrap();
        assert!(!bytes.is_empty());
    }
}
