//! Handlers for the setup gate: status read and one-shot initialize.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use pgsetup_core::setup::orchestrator::SetupStatus;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: SetupStatus,
}

#[derive(Debug, Serialize)]
pub struct InitializeResponse {
    pub message: &'static str,
    /// Script stdout, password redacted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: state.orchestrator.status().await,
    })
}

/// POST /api/initialize
///
/// The workflow runs on its own task: if the client disconnects or the
/// request times out, the script still runs to completion and the marker
/// is still written on success.
pub async fn initialize(State(state): State<AppState>) -> AppResult<Json<InitializeResponse>> {
    let orchestrator = Arc::clone(&state.orchestrator);
    let report = tokio::spawn(async move { orchestrator.initialize().await })
        .await
        .map_err(|e| AppError::InternalError(format!("Initialization task aborted: {e}")))??;

    Ok(Json(InitializeResponse {
        message: "Initialization successful.",
        output: Some(report.stdout),
    }))
}
