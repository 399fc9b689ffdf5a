use axum::extract::State;
use axum::{routing::get, Json, Router};
use pgsetup_core::setup::orchestrator::SetupStatus;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the completion marker is present.
    pub setup_complete: bool,
    /// Hosts the initializer will try, in order.
    pub candidate_hosts: Vec<String>,
}

/// GET /health -- liveness plus setup state and configured hosts.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let setup_complete = state.orchestrator.status().await == SetupStatus::Complete;

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        setup_complete,
        candidate_hosts: state.config.setup.candidate_hosts.clone(),
    })
}

/// Mount health check routes (root level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
