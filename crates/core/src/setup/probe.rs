//! Lightweight database liveness check.
//!
//! [`PgIsReadyProbe`] shells out to `pg_isready`, which answers without
//! needing a database name. Every failure mode collapses to `false` so the
//! resolver never has to interpret host-specific errors.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::credentials::Credentials;
use crate::scripting::executor::RunError;
use crate::scripting::subprocess;

/// Answers whether a single host accepts connections with the given credentials.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Never fails: unreachable, rejected, timed out, or unprobeable all yield `false`.
    async fn probe(&self, host: &str, credentials: &Credentials) -> bool;
}

/// Probe backed by the PostgreSQL `pg_isready` client utility.
#[derive(Debug, Clone)]
pub struct PgIsReadyProbe {
    program: String,
    timeout: Duration,
}

impl PgIsReadyProbe {
    /// `program` is normally `pg_isready`; any executable taking
    /// `-h <host> -U <user>` and reading `PGPASSWORD` will do.
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ConnectivityProbe for PgIsReadyProbe {
    async fn probe(&self, host: &str, credentials: &Credentials) -> bool {
        tracing::info!(host, "Attempting to connect to database host");

        let mut cmd = Command::new(&self.program);
        cmd.args(["-h", host, "-U", credentials.user()]);

        match subprocess::run_command(&mut cmd, &credentials.env_vars(), self.timeout).await {
            Ok(outcome) if outcome.success() => {
                tracing::info!(
                    host,
                    output = %credentials.redact(outcome.stdout.trim()),
                    "Database host is accepting connections",
                );
                true
            }
            Ok(outcome) => {
                let detail = if outcome.stderr.trim().is_empty() {
                    &outcome.stdout
                } else {
                    &outcome.stderr
                };
                tracing::warn!(
                    host,
                    exit_code = outcome.exit_code,
                    detail = %credentials.redact(detail.trim()),
                    "Failed to connect to database host",
                );
                false
            }
            Err(RunError::Launch(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::error!(
                    program = %self.program,
                    "Probe command not found; ensure postgresql-client is installed",
                );
                false
            }
            Err(e) => {
                tracing::warn!(host, error = %e, "Connectivity probe did not complete");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
