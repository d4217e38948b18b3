//! Configuration loader for the `agrometeo-dashboard` service.
//!
//! All runtime configuration is resolved once at startup, loading from
//! environment variables (with optional `.env` file support provided by the
//! caller), and then handed to the pollers and the server. Nothing else in
//! the crate reads the environment.
//!
use std::{env, net::SocketAddr, time::Duration};

use anyhow::{anyhow, bail, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u64 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 4000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Data source base URL, without trailing slash.
    pub backend_url: String,

    /// Period of both the sensor and the error feed.
    pub poll_interval: Duration,

    /// Upper bound on a single feed request.
    pub request_timeout: Duration,

    /// Address the dashboard API listens on.
    pub bind_addr: SocketAddr,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `BACKEND_URL` – data source base URL
///
/// Optional:
/// - `POLL_INTERVAL_MS` – feed period (default: 5000)
/// - `REQUEST_TIMEOUT_MS` – per-request timeout (default: 4000)
/// - `BIND_ADDR` – API listen address (default: `0.0.0.0:8080`)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let backend_url = require_env!("BACKEND_URL");
    let poll_interval_ms = parse_env_u64!("POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS);
    let request_timeout_ms = parse_env_u64!("REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS);
    let bind_addr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse::<SocketAddr>()
        .map_err(|e| anyhow!("Invalid BIND_ADDR: {}", e))?;

    build(backend_url, poll_interval_ms, request_timeout_ms, bind_addr)
}

fn build(
    backend_url: String,
    poll_interval_ms: u64,
    request_timeout_ms: u64,
    bind_addr: SocketAddr,
) -> Result<Config> {
    // ---
    let backend_url = backend_url.trim().trim_end_matches('/').to_string();
    if backend_url.is_empty() {
        bail!("BACKEND_URL must not be empty");
    }
    if poll_interval_ms == 0 {
        bail!("POLL_INTERVAL_MS must be greater than zero");
    }
    if request_timeout_ms == 0 {
        bail!("REQUEST_TIMEOUT_MS must be greater than zero");
    }

    Ok(Config {
        backend_url,
        poll_interval: Duration::from_millis(poll_interval_ms),
        request_timeout: Duration::from_millis(request_timeout_ms),
        bind_addr,
    })
}

impl Config {
    /// Defaults for everything but the data source.
    pub fn for_backend(backend_url: impl Into<String>) -> Self {
        // ---
        let backend_url: String = backend_url.into();
        Config {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }

    /// Full URL of one feed, e.g. `{backend}/sensors`.
    pub fn feed_url(&self, path: &str) -> String {
        format!("{}/{}", self.backend_url, path)
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  BACKEND_URL        : {}", self.backend_url);
        tracing::info!("  POLL_INTERVAL_MS   : {}", self.poll_interval.as_millis());
        tracing::info!("  REQUEST_TIMEOUT_MS : {}", self.request_timeout.as_millis());
        tracing::info!("  BIND_ADDR          : {}", self.bind_addr);
    }
}
