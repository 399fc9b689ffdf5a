use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pgsetup_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for setup failures and adds an HTTP-specific
/// internal variant. Implements [`IntoResponse`] so every failure reaches
/// the caller as a JSON body describing its category.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A setup workflow failure from `pgsetup_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Core(core) => match core {
                // User error: the only 400 that uses `message` instead of `error`.
                CoreError::AlreadyInitialized => (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "Setup is already complete." }),
                ),
                CoreError::ScriptFailed { stdout, stderr, .. } => (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "Initialization script failed.",
                        "stdout": stdout,
                        "stderr": stderr,
                    }),
                ),
                CoreError::ScriptNotFound(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Initialization script not found." }),
                ),
                CoreError::CredentialsMissing => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Database credentials not found in environment variables." }),
                ),
                CoreError::NoHostReachable { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Could not connect to any of the specified database hosts." }),
                ),
                CoreError::ScriptLaunch(details) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to execute initialization script.",
                        "details": details,
                    }),
                ),
                CoreError::ScriptTimedOut { .. } | CoreError::MarkerWrite(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": format!("An unexpected error occurred: {core}") }),
                ),
            },
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "An unexpected error occurred." }),
    )
}
