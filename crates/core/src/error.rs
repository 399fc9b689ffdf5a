/// Failure taxonomy for the setup workflow.
///
/// Every variant is terminal for the initialize call that produced it. The
/// completion marker is only written on success, so any of these can be
/// retried by calling initialize again.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Setup is already complete")]
    AlreadyInitialized,

    #[error("Initialization script not found: {0}")]
    ScriptNotFound(String),

    #[error("Database credentials are not configured")]
    CredentialsMissing,

    #[error("No candidate database host is reachable (tried: {})", .attempted.join(", "))]
    NoHostReachable { attempted: Vec<String> },

    #[error("Initialization script exited with code {exit_code}")]
    ScriptFailed {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("Failed to launch initialization script: {0}")]
    ScriptLaunch(String),

    #[error("Initialization script timed out after {elapsed_ms}ms")]
    ScriptTimedOut { elapsed_ms: u64 },

    #[error("Failed to write completion marker: {0}")]
    MarkerWrite(String),
}

impl CoreError {
    /// Deployment-level misconfiguration (absent script or credentials).
    pub fn is_config_missing(&self) -> bool {
        matches!(self, Self::ScriptNotFound(_) | Self::CredentialsMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_host_reachable_lists_attempted_hosts() {
        let err = CoreError::NoHostReachable {
            attempted: vec!["db-a".into(), "db-b".into()],
        };
        assert_eq!(
            err.to_string(),
            "No candidate database host is reachable (tried: db-a, db-b)"
        );
    }

    #[test]
    fn config_missing_class() {
        assert!(CoreError::CredentialsMissing.is_config_missing());
        assert!(CoreError::ScriptNotFound("/x.sh".into()).is_config_missing());
        assert!(!CoreError::AlreadyInitialized.is_config_missing());
        assert!(!CoreError::ScriptLaunch("denied".into()).is_config_missing());
    }
}
