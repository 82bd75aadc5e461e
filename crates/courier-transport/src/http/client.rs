//! HTTP client used for outbound platform calls.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use courier_core::{JsonPoster, TransportError, TransportResult};

/// Default timeout applied to every outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A pooled HTTP client that posts JSON with bearer authentication.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with the [default timeout](DEFAULT_TIMEOUT).
    pub fn new() -> TransportResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> TransportResult<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::InvalidConfig(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl JsonPoster for HttpClient {
    async fn post_json(&self, url: &str, bearer: &str, body: &Value) -> TransportResult<()> {
        debug!(url = %url, "Posting JSON");

        let resp = self
            .client
            .post(url)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), "Platform call rejected");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(())
    }
}
