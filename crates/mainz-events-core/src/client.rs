//! HTTP client for mainz.de
//!
//! Plain GET requests with no custom headers, no retries and no rate
//! limiting. Anything but a 200 response is a failure for that request only.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// Source of raw page documents.
///
/// The paginator and the detail extractor only talk to this trait, so tests
/// can swap the network for an in-memory page table.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the document at `url` and return its body.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: none, a hung request stalls its caller)
    pub timeout_secs: Option<u64>,
}

/// HTTP client used against the live site
pub struct HttpClient {
    /// Underlying HTTP client
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    /// # Errors
    /// - `ScrapeError::Transport` - connection failure or unreadable body
    /// - `ScrapeError::Status` - any status other than 200
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status != reqwest::StatusCode::OK {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
