//! Central setup orchestrator.
//!
//! Sequences the completion gate, host resolution, script execution, and
//! marker write for a single initialize call. Held by the HTTP layer as an
//! `Arc<SetupOrchestrator>`.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::credentials::Credentials;
use crate::error::CoreError;
use crate::scripting::executor::{RunError, ScriptRunner};
use crate::scripting::init_script::InitScriptRunner;

use super::config::SetupConfig;
use super::marker::{FileMarker, SetupState};
use super::probe::{ConnectivityProbe, PgIsReadyProbe};
use super::resolver::HostResolver;

/// Answer to a status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupStatus {
    Complete,
    Incomplete,
}

/// Result of a successful initialize call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeReport {
    /// Host the script ran against.
    pub host: String,
    /// Script stdout with the password redacted.
    pub stdout: String,
}

/// Runs the one-shot initialization workflow.
///
/// Each [`initialize`](Self::initialize) call goes through:
/// 1. Completion gate (marker present -> `AlreadyInitialized`).
/// 2. Script presence and credential checks.
/// 3. Ordered host resolution.
/// 4. Script execution.
/// 5. Marker write, only when the script exited 0.
///
/// Nothing before step 5 is persisted. The whole sequence holds
/// `init_lock`, so concurrent calls run the script at most once.
pub struct SetupOrchestrator {
    script_path: PathBuf,
    candidate_hosts: Vec<String>,
    credentials: Option<Credentials>,
    resolver: HostResolver,
    runner: Arc<dyn ScriptRunner>,
    state: Arc<dyn SetupState>,
    init_lock: Mutex<()>,
}

impl SetupOrchestrator {
    pub fn new(
        config: &SetupConfig,
        probe: Arc<dyn ConnectivityProbe>,
        runner: Arc<dyn ScriptRunner>,
        state: Arc<dyn SetupState>,
    ) -> Self {
        Self {
            script_path: config.script_path.clone(),
            candidate_hosts: config.candidate_hosts.clone(),
            credentials: config.credentials.clone(),
            resolver: HostResolver::new(probe),
            runner,
            state,
            init_lock: Mutex::new(()),
        }
    }

    /// Wire the production collaborators: `pg_isready`, the script runner,
    /// and the file marker.
    pub fn from_config(config: &SetupConfig) -> Self {
        Self::new(
            config,
            Arc::new(PgIsReadyProbe::new(
                config.probe_command.clone(),
                config.probe_timeout,
            )),
            Arc::new(InitScriptRunner::new(config.script_timeout)),
            Arc::new(FileMarker::new(config.marker_path.clone())),
        )
    }

    /// Pure read of the completion flag. Does not wait for a running initialize.
    pub async fn status(&self) -> SetupStatus {
        if self.state.is_complete().await {
            SetupStatus::Complete
        } else {
            SetupStatus::Incomplete
        }
    }

    pub async fn initialize(&self) -> Result<InitializeReport, CoreError> {
        let _guard = self.init_lock.lock().await;

        if self.state.is_complete().await {
            tracing::info!("Initialization requested, but setup is already complete");
            return Err(CoreError::AlreadyInitialized);
        }

        tracing::info!("Initialization process started");

        if !self.script_exists().await {
            tracing::error!(script = %self.script_path.display(), "Initialization script not found");
            return Err(CoreError::ScriptNotFound(
                self.script_path.display().to_string(),
            ));
        }

        let Some(credentials) = self.credentials.as_ref() else {
            tracing::error!("Database credentials (POSTGRES_USER, POSTGRES_PASSWORD) not found");
            return Err(CoreError::CredentialsMissing);
        };

        let host = self
            .resolver
            .resolve(&self.candidate_hosts, credentials)
            .await
            .ok_or_else(|| CoreError::NoHostReachable {
                attempted: self.candidate_hosts.clone(),
            })?;

        let outcome = self
            .runner
            .run(&self.script_path, &host, credentials.env_vars())
            .await
            .map_err(|e| launch_error(e, credentials))?;

        let stdout = credentials.redact(&outcome.stdout);
        let stderr = credentials.redact(&outcome.stderr);

        if !stdout.is_empty() {
            tracing::info!(stdout = %stdout, "Script stdout");
        }
        if !stderr.is_empty() {
            tracing::error!(stderr = %stderr, "Script stderr");
        }

        if !outcome.success() {
            tracing::error!(
                exit_code = outcome.exit_code,
                duration_ms = outcome.duration_ms,
                "Initialization script failed",
            );
            return Err(CoreError::ScriptFailed {
                exit_code: outcome.exit_code,
                stdout,
                stderr,
            });
        }

        self.state.mark_complete().await?;
        tracing::info!(host = %host, duration_ms = outcome.duration_ms, "Initialization successful");

        Ok(InitializeReport { host, stdout })
    }

    async fn script_exists(&self) -> bool {
        tokio::fs::metadata(&self.script_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }
}

fn launch_error(err: RunError, credentials: &Credentials) -> CoreError {
    match err {
        RunError::NotFound(path) => CoreError::ScriptNotFound(path),
        RunError::Launch(e) => {
            let msg = credentials.redact(&e.to_string());
            tracing::error!(error = %msg, "Failed to execute initialization script");
            CoreError::ScriptLaunch(msg)
        }
        RunError::Timeout { elapsed_ms } => {
            tracing::error!(elapsed_ms, "Initialization script timed out and was killed");
            CoreError::ScriptTimedOut { elapsed_ms }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
