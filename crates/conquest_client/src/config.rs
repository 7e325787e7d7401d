use crate::{ConquestError, Result};

use reqwest::Client;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const ENV_API_URL: &str = "CONQUEST_API_URL";
pub const ENV_USERNAME: &str = "CONQUEST_USERNAME";
pub const ENV_PASSWORD: &str = "CONQUEST_PASSWORD";
pub const ENV_CONNECTION: &str = "CONQUEST_CONNECTION";
pub const ENV_ACCEPT_INVALID_CERTS: &str = "CONQUEST_ACCEPT_INVALID_CERTS";

/// Parameters needed to open a session with a Conquest API instance.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Base URL of the API, e.g. `https://api.domain.gov.au/`.
    pub api_url: String,
    pub username: String,
    pub password: String,
    /// Name of the Conquest connection to authenticate against.
    pub connection: String,
    /// Accept self-signed or otherwise invalid TLS certificates.
    ///
    /// Defaults to `false`. On-premise Conquest installations are often served with
    /// internal certificates; only enable this for such hosts.
    pub accept_invalid_certs: bool,
    /// Overall per-request timeout. [`None`] keeps the transport default.
    pub timeout: Option<Duration>,
}

impl ConnectionConfig {
    pub fn new(
        api_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        connection: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            username: username.into(),
            password: password.into(),
            connection: connection.into(),
            accept_invalid_certs: false,
            timeout: None,
        }
    }

    /// Reads `CONQUEST_API_URL`, `CONQUEST_USERNAME`, `CONQUEST_PASSWORD`, `CONQUEST_CONNECTION`
    /// and optionally `CONQUEST_ACCEPT_INVALID_CERTS` (`1`/`true`).
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            env::var(name).map_err(|_| ConquestError::Config(format!("{name} is not set")))
        };

        let mut config = Self::new(
            var(ENV_API_URL)?,
            var(ENV_USERNAME)?,
            var(ENV_PASSWORD)?,
            var(ENV_CONNECTION)?,
        );
        config.accept_invalid_certs = env::var(ENV_ACCEPT_INVALID_CERTS)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(config)
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn build_http(&self) -> Result<Client> {
        if self.accept_invalid_certs {
            warn!(
                api_url = %self.api_url,
                connection = %self.connection,
                "TLS certificate verification DISABLED for Conquest API"
            );
        }

        let mut builder = Client::builder().danger_accept_invalid_certs(self.accept_invalid_certs);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| ConquestError::Config(e.to_string()))
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("connection", &self.connection)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Settings of an [`Import`](crate::Import).
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Directory error CSVs of failed batches are written to.
    ///
    /// Defaults to the platform temp directory.
    pub output_dir: PathBuf,
    /// Delay between two state polls of a batch.
    ///
    /// Defaults to 100ms.
    pub poll_interval: Duration,
    /// Give up waiting for a batch that is still processing after this long.
    /// [`None`] waits indefinitely.
    ///
    /// Defaults to 5 minutes.
    pub poll_timeout: Option<Duration>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            output_dir: env::temp_dir(),
            poll_interval: Duration::from_millis(100),
            poll_timeout: Some(Duration::from_secs(300)),
        }
    }
}

impl ImportConfig {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
