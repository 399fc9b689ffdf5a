#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use pgsetup_api::config::ServerConfig;
use pgsetup_api::router::build_app_router;
use pgsetup_api::state::AppState;
use pgsetup_core::credentials::Credentials;
use pgsetup_core::scripting::init_script::InitScriptRunner;
use pgsetup_core::setup::config::SetupConfig;
use pgsetup_core::setup::marker::FileMarker;
use pgsetup_core::setup::orchestrator::SetupOrchestrator;
use pgsetup_core::setup::probe::ConnectivityProbe;

pub const TEST_USER: &str = "postgres";
pub const TEST_PASSWORD: &str = "sup3r-s3cret-pw";

/// Probe that answers from a fixed reachable set and records each host asked.
pub struct FakeProbe {
    reachable: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeProbe {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConnectivityProbe for FakeProbe {
    async fn probe(&self, host: &str, _credentials: &Credentials) -> bool {
        self.calls.lock().unwrap().push(host.to_string());
        self.reachable.iter().any(|h| h == host)
    }
}

/// A scratch deployment: script and marker live in a temp directory, the
/// script is run for real, and host probing is faked.
pub struct TestEnv {
    pub dir: tempfile::TempDir,
    pub config: ServerConfig,
    pub probe: Arc<FakeProbe>,
    pub state: AppState,
}

impl TestEnv {
    pub fn new(reachable: &[&str]) -> Self {
        Self::with_credentials(reachable, Credentials::new(TEST_USER, TEST_PASSWORD))
    }

    pub fn with_credentials(reachable: &[&str], credentials: Option<Credentials>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let setup = SetupConfig {
            script_path: dir.path().join("initialize_postgres.sh"),
            marker_path: dir.path().join("config/setup.complete"),
            candidate_hosts: vec!["komodo-postgres-1".into(), "pangolin-postgres".into()],
            credentials,
            probe_command: "pg_isready".into(),
            probe_timeout: Duration::from_secs(5),
            script_timeout: Duration::from_secs(10),
        };
        let config = test_config(setup);

        let probe = Arc::new(FakeProbe {
            reachable: reachable.iter().map(|h| h.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        });
        let orchestrator = SetupOrchestrator::new(
            &config.setup,
            probe.clone(),
            Arc::new(InitScriptRunner::new(config.setup.script_timeout)),
            Arc::new(FileMarker::new(config.setup.marker_path.clone())),
        );
        let state = AppState {
            config: Arc::new(config.clone()),
            orchestrator: Arc::new(orchestrator),
        };

        Self {
            dir,
            config,
            probe,
            state,
        }
    }

    /// Place the initialization script (without the execute bit).
    pub fn write_script(&self, body: &str) {
        std::fs::write(
            &self.config.setup.script_path,
            format!("#!/bin/sh\n{body}"),
        )
        .unwrap();
    }

    /// File the scripts in these tests touch to prove they ran.
    pub fn sentinel(&self) -> PathBuf {
        self.dir.path().join("script-ran")
    }

    pub fn marker_exists(&self) -> bool {
        self.config.setup.marker_path.exists()
    }

    /// Fresh router over the same shared state.
    pub fn app(&self) -> Router {
        build_app_router(self.state.clone(), &self.config)
    }
}

/// Build a test `ServerConfig` around the given setup settings.
pub fn test_config(setup: SetupConfig) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        setup,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri).await
}

async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
