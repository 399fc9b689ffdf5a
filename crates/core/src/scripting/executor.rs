//! Script execution interface and shared types.
//!
//! Defines [`ScriptRunner`], the seam the setup orchestrator calls through,
//! along with [`ScriptOutcome`] and [`RunError`].

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;

/// Captured result of a script that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptOutcome {
    /// Complete stdout captured from the process.
    pub stdout: String,
    /// Complete stderr captured from the process.
    pub stderr: String,
    /// Process exit code (`-1` if killed by signal).
    pub exit_code: i32,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ScriptOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Errors that prevent a script from producing an outcome at all.
///
/// A non-zero exit is *not* an error at this level; it is reported through
/// [`ScriptOutcome::exit_code`] so the captured output survives.
#[derive(Debug)]
pub enum RunError {
    /// The script file was not found at the specified path.
    NotFound(String),
    /// Setting permissions, spawning, or waiting on the process failed.
    Launch(std::io::Error),
    /// The script exceeded its configured timeout and was killed.
    Timeout {
        /// Elapsed wall-clock time before the process was killed.
        elapsed_ms: u64,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Script not found: {path}"),
            Self::Launch(err) => write!(f, "Failed to launch script: {err}"),
            Self::Timeout { elapsed_ms } => {
                write!(f, "Script timed out after {elapsed_ms}ms")
            }
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Launch(err) => Some(err),
            _ => None,
        }
    }
}

/// Runs the external initialization program against a resolved host.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Execute `script_path` with `host` as its sole positional argument.
    ///
    /// `env_vars` are added to the child's environment only.
    async fn run(
        &self,
        script_path: &Path,
        host: &str,
        env_vars: Vec<(String, String)>,
    ) -> Result<ScriptOutcome, RunError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
