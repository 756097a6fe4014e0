//! HTTP ingestion sink.

use super::{LogSink, SinkError};
use crate::models::LogEntry;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use std::time::Duration;

/// Header carrying the tenant identifier on every backend request.
pub const PROJECT_ID_HEADER: &str = "x-project-id";

/// Configuration for [`HttpLogSink`].
#[derive(Debug, Clone)]
pub struct HttpSinkConfig {
    /// Base URL of the ingestion API, e.g. `http://localhost:8090`.
    pub base_url: String,
    /// Tenant identifier sent with every request.
    pub project_id: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent sent with every request.
    pub user_agent: String,
}

impl Default for HttpSinkConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            project_id: String::new(),
            timeout: Duration::from_secs(5),
            user_agent: "chattylogs".to_string(),
        }
    }
}

/// Sink that posts each entry to `{base_url}/api/v1/logs`.
#[derive(Debug, Clone)]
pub struct HttpLogSink {
    client: reqwest::Client,
    ingest_url: Url,
    health_url: Url,
}

impl HttpLogSink {
    /// Builds the sink without contacting the backend.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::InvalidConfig`] if the base URL or project id
    /// cannot be used, or if the HTTP client cannot be built.
    pub fn new(config: &HttpSinkConfig) -> Result<Self, SinkError> {
        let base = config.base_url.trim_end_matches('/');
        let ingest_url = Url::parse(&format!("{base}/api/v1/logs"))
            .map_err(|e| SinkError::InvalidConfig(format!("invalid backend URL: {e}")))?;
        let health_url = Url::parse(&format!("{base}/health"))
            .map_err(|e| SinkError::InvalidConfig(format!("invalid backend URL: {e}")))?;

        let project = HeaderValue::from_str(&config.project_id)
            .map_err(|e| SinkError::InvalidConfig(format!("invalid project id: {e}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(PROJECT_ID_HEADER), project);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| SinkError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        tracing::debug!(url = %ingest_url, "HTTP log sink configured");

        Ok(Self {
            client,
            ingest_url,
            health_url,
        })
    }

    /// Probes `{base_url}/health`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or answers with a
    /// non-success status.
    pub async fn health_check(&self) -> Result<(), SinkError> {
        let response = self.client.get(self.health_url.clone()).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SinkError::Rejected {
                status: status.as_u16(),
            })
        }
    }

    /// Returns the URL entries are posted to.
    #[must_use]
    pub fn ingest_url(&self) -> &Url {
        &self.ingest_url
    }
}

#[async_trait]
impl LogSink for HttpLogSink {
    async fn write(&self, entry: LogEntry) -> Result<(), SinkError> {
        entry.validate_entry()?;

        let response = self
            .client
            .post(self.ingest_url.clone())
            .json(&entry)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SinkError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
