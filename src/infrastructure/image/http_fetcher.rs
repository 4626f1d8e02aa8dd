//! HTTP image fetcher.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, trace};

use crate::domain::errors::FetchError;
use crate::domain::ports::ImageFetcherPort;

use super::codec::decode_image;

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Whole-request timeout. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

/// Downloads images with a plain HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    http_client: reqwest::Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher with the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| FetchError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http_client })
    }

    /// Downloads the full response body.
    async fn download(&self, url: &str) -> Result<Bytes, FetchError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|e| FetchError::invalid_url(url, e.to_string()))?;

        let response = self
            .http_client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::network(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(format!("Failed to read body: {e}")))?;

        trace!(url = %url, size = bytes.len(), "Downloaded response body");
        Ok(bytes)
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<image::DynamicImage, FetchError> {
        debug!(url = %url, "Downloading image");

        let bytes = self.download(url).await?;

        let decoded = tokio::task::spawn_blocking(move || decode_image(&bytes))
            .await
            .map_err(|e| FetchError::decode(format!("Decode task panicked: {e}")))?
            .map_err(|e| FetchError::decode(e.to_string()))?;

        debug!(
            url = %url,
            width = decoded.width(),
            height = decoded.height(),
            "Image decoded"
        );
        Ok(decoded)
    }
}
