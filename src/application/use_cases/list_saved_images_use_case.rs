//! Saved images listing use case.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::services::Executors;
use crate::domain::entities::DownloadedImage;
use crate::domain::ports::ImageStorePort;

/// Re-reads the documents directory on the `disk` queue.
#[derive(Clone)]
pub struct ListSavedImagesUseCase {
    store: Arc<dyn ImageStorePort>,
    executors: Arc<Executors>,
}

impl ListSavedImagesUseCase {
    /// Creates new listing use case.
    #[must_use]
    pub fn new(store: Arc<dyn ImageStorePort>, executors: Arc<Executors>) -> Self {
        Self { store, executors }
    }

    /// Submits a directory scan to the `disk` queue. The future resolves to
    /// every decodable saved image and never fails; problems yield fewer
    /// (or no) entries.
    pub fn execute(&self) -> impl Future<Output = Vec<DownloadedImage>> + Send + use<> {
        let store = self.store.clone();
        let handle = self
            .executors
            .disk()
            .submit(async move { store.list_saved().await });

        async move {
            match handle.await {
                Ok(images) => {
                    debug!(count = images.len(), "Saved images listed");
                    images
                }
                Err(e) => {
                    warn!(error = %e, "Could not list saved images");
                    Vec::new()
                }
            }
        }
    }
}
