//! Platform metadata lookup.
//!
//! Resolves the tenant identifier from the compute metadata server, with an
//! environment-provided fallback.

use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;
use thiserror::Error;

/// User-Agent sent on every metadata request.
pub const METADATA_USER_AGENT: &str = "chattylogs";

const PROJECT_ID_PATH: &str = "/computeMetadata/v1/project/project-id";

/// Errors returned by the metadata client.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build metadata client: {0}")]
    Client(String),

    /// The request did not complete.
    #[error("Metadata request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The metadata server answered with a non-success status.
    #[error("Metadata server returned status {0}")]
    Status(u16),

    /// The metadata server answered with an empty value.
    #[error("Metadata server returned an empty project id")]
    Empty,
}

/// Client for the compute metadata server.
///
/// Every request carries `Metadata-Flavor: Google` and the chattylogs
/// User-Agent.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    client: reqwest::Client,
    base_url: String,
}

impl MetadataClient {
    /// Creates a client for `host`, which may include a port.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(host: &str) -> Result<Self, MetadataError> {
        Self::with_base_url(format!("http://{host}"))
    }

    /// Creates a client for a full base URL such as `http://127.0.0.1:8181`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, MetadataError> {
        let mut headers = HeaderMap::new();
        headers.insert("metadata-flavor", HeaderValue::from_static("Google"));

        let client = reqwest::Client::builder()
            .user_agent(METADATA_USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(2))
            .build()
            .map_err(|e| MetadataError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the project id of the current host.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable, answers with a
    /// non-success status, or returns an empty value.
    pub async fn project_id(&self) -> Result<String, MetadataError> {
        let url = format!("{}{}", self.base_url, PROJECT_ID_PATH);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status(status.as_u16()));
        }

        let id = response.text().await?.trim().to_string();
        if id.is_empty() {
            return Err(MetadataError::Empty);
        }
        Ok(id)
    }
}

/// Resolves the tenant identifier.
///
/// Asks the metadata server first and falls back to `fallback` on any
/// failure. Returns an empty string when neither source has a value; the
/// logging backend rejects that later.
pub async fn resolve_project_id(metadata: Option<&MetadataClient>, fallback: Option<String>) -> String {
    let lookup = match metadata {
        Some(client) => client.project_id().await,
        None => Err(MetadataError::Client("metadata client unavailable".to_string())),
    };

    match lookup {
        Ok(id) => id,
        Err(error) => {
            tracing::warn!(%error, "Cannot get project id from metadata, defaulting to PROJECT_ID");
            fallback.unwrap_or_default()
        }
    }
}
