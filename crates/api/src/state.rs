use std::sync::Arc;

use pgsetup_core::setup::orchestrator::SetupOrchestrator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Setup workflow coordinator.
    pub orchestrator: Arc<SetupOrchestrator>,
}
