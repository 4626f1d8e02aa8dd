//! Download and save workflow.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::services::{Executors, QueueError};
use crate::domain::entities::DownloadedImage;
use crate::domain::errors::DownloadError;
use crate::domain::ports::{ImageFetcherPort, ImageStorePort};

/// Fetches images on the `network` queue and saves them on the `disk` queue.
///
/// The two steps are separate calls so the caller can show the image
/// between them.
#[derive(Clone)]
pub struct DownloadImageUseCase {
    fetcher: Arc<dyn ImageFetcherPort>,
    store: Arc<dyn ImageStorePort>,
    executors: Arc<Executors>,
}

impl DownloadImageUseCase {
    /// Creates new download use case.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn ImageFetcherPort>,
        store: Arc<dyn ImageStorePort>,
        executors: Arc<Executors>,
    ) -> Self {
        Self {
            fetcher,
            store,
            executors,
        }
    }

    /// Submits a download of `url` to the `network` queue and returns its
    /// result future.
    ///
    /// The job is queued before this returns, so downloads run in call
    /// order however the returned futures are polled.
    ///
    /// # Errors
    /// The future fails if the url is blank, the download or decode fails,
    /// or the network queue is gone.
    pub fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<DownloadedImage, DownloadError>> + Send + use<> {
        let url = url.trim().to_string();
        let handle = if url.is_empty() {
            debug!("Ignoring blank url");
            None
        } else {
            let fetcher = self.fetcher.clone();
            let task_url = url.clone();
            Some(
                self.executors
                    .network()
                    .submit(async move { fetcher.fetch(&task_url).await }),
            )
        };

        async move {
            let Some(handle) = handle else {
                return Err(DownloadError::BlankUrl);
            };

            match handle.await.map_err(queue_error)? {
                Ok(image) => {
                    info!(
                        url = %url,
                        width = image.width(),
                        height = image.height(),
                        "Image downloaded"
                    );
                    Ok(DownloadedImage::from_network(image, url))
                }
                Err(e) => {
                    let error = DownloadError::from(e);
                    if error.is_input_error() {
                        debug!(url = %url, error = %error, "Rejected url");
                    } else {
                        warn!(url = %url, error = %error, "Image download failed");
                    }
                    Err(error)
                }
            }
        }
    }

    /// Submits a save of `image` to the `disk` queue. The future resolves
    /// to the new path.
    ///
    /// # Errors
    /// The future fails if the file cannot be written or the disk queue is
    /// gone.
    pub fn persist(
        &self,
        image: &DownloadedImage,
    ) -> impl Future<Output = Result<PathBuf, DownloadError>> + Send + use<> {
        let store = self.store.clone();
        let pixels = image.image().clone();
        let origin = image.origin().to_string();
        let handle = self
            .executors
            .disk()
            .submit(async move { store.persist(pixels).await });

        async move {
            handle.await.map_err(queue_error)?.map_err(|e| {
                warn!(origin = %origin, error = %e, "Failed to save image");
                e.into()
            })
        }
    }
}

fn queue_error(error: QueueError) -> DownloadError {
    warn!(error = %error, "Task queue unavailable");
    DownloadError::queue_closed(error.queue())
}
