use std::path::PathBuf;

use pgsetup_core::setup::config::SetupConfig;

/// Default location of the `.env` overlay mounted next to the marker.
const DEFAULT_ENV_FILE: &str = "/app/config/.env";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults matching the container layout. Override via
/// environment variables or the `.env` overlay.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` (the default) allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `900`). Keep this above
    /// `SCRIPT_TIMEOUT_SECS` or slow scripts will see a 408.
    pub request_timeout_secs: u64,
    /// Setup workflow settings (paths, candidate hosts, credentials).
    pub setup: SetupConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `5000`  |
    /// | `CORS_ORIGINS`         | `*`     |
    /// | `REQUEST_TIMEOUT_SECS` | `900`   |
    ///
    /// See [`SetupConfig::from_env`] for the setup variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let setup = SetupConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            setup,
        }
    }

    /// Whether CORS should accept any origin.
    pub fn cors_allows_any(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Load the `.env` overlay once at process start.
///
/// Reads `SETUP_ENV_FILE` (default `/app/config/.env`), falling back to a
/// `.env` in the working directory. Variables already set in the process
/// environment win. Returns the file that was loaded, if any.
pub fn load_env_overlay() -> Option<PathBuf> {
    let path = std::env::var("SETUP_ENV_FILE").unwrap_or_else(|_| DEFAULT_ENV_FILE.into());
    match dotenvy::from_path(&path) {
        Ok(()) => Some(PathBuf::from(path)),
        Err(_) => dotenvy::dotenv().ok(),
    }
}
