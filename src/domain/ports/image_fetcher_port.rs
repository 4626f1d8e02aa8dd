//! Image fetching port definition.

use async_trait::async_trait;

use crate::domain::errors::FetchError;

/// Port for downloading and decoding a remote image.
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Downloads `url` and decodes the body as an image.
    async fn fetch(&self, url: &str) -> Result<image::DynamicImage, FetchError>;
}
