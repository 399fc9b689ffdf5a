use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Setup routes, mounted under `/api`.
///
/// ```text
/// GET  /status          complete | incomplete
/// POST /initialize      run the one-shot initialization
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(handlers::setup::get_status))
        .route("/initialize", post(handlers::setup::initialize))
}
