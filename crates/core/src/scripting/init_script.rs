//! Runner for the database initialization executable.
//!
//! Runs the file directly (not through a shell). The execute bits are set
//! on every invocation immediately before spawning, so a script dropped
//! into place without `+x` still runs.

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use super::executor::{RunError, ScriptOutcome, ScriptRunner};
use super::subprocess;

/// Runs the initialization script as a child process with a bounded lifetime.
#[derive(Debug, Clone)]
pub struct InitScriptRunner {
    timeout: Duration,
}

impl InitScriptRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ScriptRunner for InitScriptRunner {
    async fn run(
        &self,
        script_path: &Path,
        host: &str,
        env_vars: Vec<(String, String)>,
    ) -> Result<ScriptOutcome, RunError> {
        let metadata = tokio::fs::metadata(script_path)
            .await
            .map_err(|_| RunError::NotFound(script_path.display().to_string()))?;
        if !metadata.is_file() {
            return Err(RunError::NotFound(script_path.display().to_string()));
        }

        // chmod +x
        let mut perms = metadata.permissions();
        perms.set_mode(perms.mode() | 0o111);
        tokio::fs::set_permissions(script_path, perms)
            .await
            .map_err(RunError::Launch)?;

        tracing::info!(script = %script_path.display(), host, "Executing initialization script");

        let mut cmd = tokio::process::Command::new(script_path);
        cmd.arg(host);
        subprocess::run_command(&mut cmd, &env_vars, self.timeout).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
