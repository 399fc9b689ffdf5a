pub mod health;
pub mod setup;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(setup::router())
}
