//! Port definition for the saved images directory.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::entities::DownloadedImage;
use crate::domain::errors::{ListError, PersistError};

/// Port for persisting images and listing what was persisted.
/// Implementations must be thread-safe.
#[async_trait]
pub trait ImageStorePort: Send + Sync {
    /// Writes `image` as a new file and returns its path.
    async fn persist(&self, image: Arc<image::DynamicImage>) -> Result<PathBuf, PersistError>;

    /// Decodes every saved image, reporting an unreadable directory.
    /// Files that fail to decode are skipped.
    async fn try_list_saved(&self) -> Result<Vec<DownloadedImage>, ListError>;

    /// Decodes every saved image. An unreadable directory yields an empty list.
    async fn list_saved(&self) -> Vec<DownloadedImage> {
        match self.try_list_saved().await {
            Ok(images) => images,
            Err(e) => {
                warn!(error = %e, "Saved images directory unavailable");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    /// In-memory store for testing.
    pub struct MockImageStore {
        saved: Arc<RwLock<Vec<(PathBuf, Arc<image::DynamicImage>)>>>,
        fail_writes: AtomicBool,
    }

    impl MockImageStore {
        /// Creates an empty store.
        pub fn new() -> Self {
            Self {
                saved: Arc::new(RwLock::new(Vec::new())),
                fail_writes: AtomicBool::new(false),
            }
        }

        /// Makes every subsequent `persist` fail.
        pub fn set_fail_writes(&self, value: bool) {
            self.fail_writes.store(value, Ordering::SeqCst);
        }

        /// Returns the number of persisted images.
        pub async fn saved_count(&self) -> usize {
            self.saved.read().await.len()
        }
    }

    impl Default for MockImageStore {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ImageStorePort for MockImageStore {
        async fn persist(
            &self,
            image: Arc<image::DynamicImage>,
        ) -> Result<PathBuf, PersistError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(PersistError::DirectoryUnavailable {
                    path: PathBuf::from("/mock"),
                });
            }
            let mut saved = self.saved.write().await;
            let path = PathBuf::from(format!("/mock/downloaded_image_{}.png", saved.len()));
            saved.push((path.clone(), image));
            Ok(path)
        }

        async fn try_list_saved(&self) -> Result<Vec<DownloadedImage>, ListError> {
            Ok(self
                .saved
                .read()
                .await
                .iter()
                .map(|(path, image)| DownloadedImage::from_disk((**image).clone(), path.clone()))
                .collect())
        }
    }
}
