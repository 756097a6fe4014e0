//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default listen port when `PORT` is unset or empty.
pub const DEFAULT_PORT: u16 = 8080;

/// Default logical stream name.
pub const DEFAULT_LOG_NAME: &str = "chattylogs";

/// Default base URL of the log ingestion backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8090";

/// Default metadata server host.
pub const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `PORT` is not a valid port number.
    #[error("Invalid PORT value {0:?}")]
    InvalidPort(String),

    /// `HOST` is not an IP address.
    #[error("Invalid HOST value {0:?}")]
    InvalidHost(String),

    /// `LOG_BACKEND` names an unknown backend.
    #[error("Unknown LOG_BACKEND {0:?}, expected \"http\" or \"memory\"")]
    UnknownBackend(String),

    /// `LOG_BACKEND_TIMEOUT_SECS` is not a whole number of seconds.
    #[error("Invalid LOG_BACKEND_TIMEOUT_SECS value {0:?}")]
    InvalidTimeout(String),
}

/// Which logging backend to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Post entries to an HTTP ingestion API.
    #[default]
    Http,
    /// Keep entries in process memory.
    Memory,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

/// Logging backend settings.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Backend implementation.
    pub kind: BackendKind,
    /// Base URL of the ingestion API (HTTP backend only).
    pub url: String,
    /// Per-request timeout (HTTP backend only).
    pub timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            kind: BackendKind::Http,
            url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `HOST`: The address to bind to (default: "0.0.0.0")
/// - `PORT`: The port to listen on (default: 8080)
/// - `PROJECT_ID`: Tenant identifier used when the metadata server is unavailable
/// - `LOG_NAME`: Logical stream name (default: "chattylogs")
/// - `LOG_BACKEND`: `http` or `memory` (default: `http`)
/// - `LOG_BACKEND_URL`: Base URL of the ingestion API (default: `http://localhost:8090`)
/// - `LOG_BACKEND_TIMEOUT_SECS`: Backend request timeout (default: 5)
/// - `GCE_METADATA_HOST`: Metadata server host (default: `metadata.google.internal`)
#[derive(Debug, Clone)]
pub struct Config {
    /// The address to bind to.
    pub host: IpAddr,
    /// The port to listen on.
    pub port: u16,
    /// Tenant identifier fallback from the environment.
    pub project_id: Option<String>,
    /// Logical stream name.
    pub log_name: String,
    /// Logging backend settings.
    pub backend: BackendSettings,
    /// Metadata server host, optionally with a port.
    pub metadata_host: String,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let host = get("HOST")
            .map(|h| h.trim().parse::<IpAddr>().map_err(|_| ConfigError::InvalidHost(h)))
            .transpose()?
            .unwrap_or(defaults.host);

        let port = get("PORT")
            .map(|p| p.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(p)))
            .transpose()?
            .unwrap_or(defaults.port);

        let kind = get("LOG_BACKEND")
            .map(|b| b.parse::<BackendKind>())
            .transpose()?
            .unwrap_or_default();

        let timeout = get("LOG_BACKEND_TIMEOUT_SECS")
            .map(|t| {
                t.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| ConfigError::InvalidTimeout(t))
            })
            .transpose()?
            .unwrap_or(defaults.backend.timeout);

        Ok(Self {
            host,
            port,
            project_id: get("PROJECT_ID"),
            log_name: get("LOG_NAME").unwrap_or(defaults.log_name),
            backend: BackendSettings {
                kind,
                url: get("LOG_BACKEND_URL").unwrap_or(defaults.backend.url),
                timeout,
            },
            metadata_host: get("GCE_METADATA_HOST").unwrap_or(defaults.metadata_host),
        })
    }

    /// Returns the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            project_id: None,
            log_name: DEFAULT_LOG_NAME.to_string(),
            backend: BackendSettings::default(),
            metadata_host: DEFAULT_METADATA_HOST.to_string(),
        }
    }
}
