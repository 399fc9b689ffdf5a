use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pgsetup_api::config::{load_env_overlay, ServerConfig};
use pgsetup_api::router::build_app_router;
use pgsetup_api::state::AppState;
use pgsetup_core::setup::orchestrator::SetupOrchestrator;

#[tokio::main]
async fn main() {
    let env_file = load_env_overlay();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pgsetup_api=debug,pgsetup_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(path) = &env_file {
        tracing::info!(path = %path.display(), "Loaded environment overlay");
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        script = %config.setup.script_path.display(),
        marker = %config.setup.marker_path.display(),
        candidates = ?config.setup.candidate_hosts,
        credentials_present = config.setup.credentials.is_some(),
        "Loaded server configuration",
    );

    // --- Setup orchestrator ---
    let orchestrator = Arc::new(SetupOrchestrator::from_config(&config.setup));
    tracing::info!(status = ?orchestrator.status().await, "Setup state on startup");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        orchestrator,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
