use std::path::PathBuf;
use std::time::Duration;

use crate::credentials::Credentials;

const DEFAULT_SCRIPT_PATH: &str = "/app/initialize_postgres.sh";
const DEFAULT_MARKER_PATH: &str = "/app/config/setup.complete";
const DEFAULT_CANDIDATE_HOSTS: &[&str] = &["komodo-postgres-1", "pangolin-postgres"];
const DEFAULT_PROBE_COMMAND: &str = "pg_isready";
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SCRIPT_TIMEOUT_SECS: u64 = 600;

/// Settings for the one-shot database setup workflow.
#[derive(Debug, Clone)]
pub struct SetupConfig {
    /// Initialization executable, run with the resolved host as `$1`.
    pub script_path: PathBuf,
    /// File whose presence means setup has completed.
    pub marker_path: PathBuf,
    /// Database hosts tried in order; the first reachable one is used.
    pub candidate_hosts: Vec<String>,
    /// `None` when `POSTGRES_USER` or `POSTGRES_PASSWORD` is unset or empty.
    pub credentials: Option<Credentials>,
    /// Connectivity probe program (default: `pg_isready`).
    pub probe_command: String,
    pub probe_timeout: Duration,
    pub script_timeout: Duration,
}

impl SetupConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                              |
    /// |-----------------------|--------------------------------------|
    /// | `SETUP_SCRIPT_PATH`   | `/app/initialize_postgres.sh`        |
    /// | `SETUP_MARKER_PATH`   | `/app/config/setup.complete`         |
    /// | `DB_CANDIDATE_HOSTS`  | `komodo-postgres-1,pangolin-postgres`|
    /// | `POSTGRES_USER`       | --                                   |
    /// | `POSTGRES_PASSWORD`   | --                                   |
    /// | `PROBE_COMMAND`       | `pg_isready`                         |
    /// | `PROBE_TIMEOUT_SECS`  | `10`                                 |
    /// | `SCRIPT_TIMEOUT_SECS` | `600`                                |
    ///
    /// Missing credentials are not fatal here; initialize reports them.
    pub fn from_env() -> Self {
        let script_path = std::env::var("SETUP_SCRIPT_PATH")
            .unwrap_or_else(|_| DEFAULT_SCRIPT_PATH.into())
            .into();

        let marker_path = std::env::var("SETUP_MARKER_PATH")
            .unwrap_or_else(|_| DEFAULT_MARKER_PATH.into())
            .into();

        let candidate_hosts = std::env::var("DB_CANDIDATE_HOSTS")
            .map(|raw| parse_host_list(&raw))
            .ok()
            .filter(|hosts| !hosts.is_empty())
            .unwrap_or_else(default_candidate_hosts);

        let credentials = Credentials::new(
            std::env::var("POSTGRES_USER").unwrap_or_default(),
            std::env::var("POSTGRES_PASSWORD").unwrap_or_default(),
        );

        let probe_command =
            std::env::var("PROBE_COMMAND").unwrap_or_else(|_| DEFAULT_PROBE_COMMAND.into());

        let probe_timeout_secs: u64 = std::env::var("PROBE_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_PROBE_TIMEOUT_SECS.to_string())
            .parse()
            .expect("PROBE_TIMEOUT_SECS must be a valid u64");

        let script_timeout_secs: u64 = std::env::var("SCRIPT_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_SCRIPT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("SCRIPT_TIMEOUT_SECS must be a valid u64");

        Self {
            script_path,
            marker_path,
            candidate_hosts,
            credentials,
            probe_command,
            probe_timeout: Duration::from_secs(probe_timeout_secs),
            script_timeout: Duration::from_secs(script_timeout_secs),
        }
    }
}

pub fn default_candidate_hosts() -> Vec<String> {
    DEFAULT_CANDIDATE_HOSTS.iter().map(|h| h.to_string()).collect()
}

/// Split a comma-separated host list, preserving order and dropping blanks.
pub fn parse_host_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_list_keeps_declaration_order() {
        assert_eq!(
            parse_host_list("primary, secondary ,tertiary"),
            vec!["primary", "secondary", "tertiary"]
        );
    }

    #[test]
    fn host_list_drops_blank_entries() {
        assert_eq!(parse_host_list(" , a,,b , "), vec!["a", "b"]);
        assert!(parse_host_list("  ").is_empty());
    }

    #[test]
    fn default_hosts_are_komodo_then_pangolin() {
        assert_eq!(
            default_candidate_hosts(),
            vec!["komodo-postgres-1", "pangolin-postgres"]
        );
    }
}
