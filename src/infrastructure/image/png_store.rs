//! Documents-directory image store.
//!
//! Persists images as `downloaded_image_<millis>.png` and lists every PNG
//! found in the same directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, trace, warn};

use crate::domain::entities::{DownloadedImage, SavedFileName, has_saved_extension};
use crate::domain::errors::{ListError, PersistError};
use crate::domain::ports::ImageStorePort;

use super::codec::{decode_image, encode_png};

/// How many later timestamps are tried when a file name is taken.
pub const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Image store backed by a single flat directory.
#[derive(Debug, Clone)]
pub struct PngImageStore {
    documents_dir: PathBuf,
}

impl PngImageStore {
    /// Creates a store over `documents_dir`. The directory is never created.
    #[must_use]
    pub const fn new(documents_dir: PathBuf) -> Self {
        Self { documents_dir }
    }

    /// Returns the directory the store reads and writes.
    #[must_use]
    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    /// Persists `image` under `name`, or the first free later timestamp.
    ///
    /// # Errors
    /// Returns error if the directory is missing, encoding fails or the
    /// file cannot be written. No file is left behind on error.
    pub async fn persist_as(
        &self,
        image: Arc<image::DynamicImage>,
        name: SavedFileName,
    ) -> Result<PathBuf, PersistError> {
        let is_dir = fs::metadata(&self.documents_dir)
            .await
            .is_ok_and(|meta| meta.is_dir());
        if !is_dir {
            return Err(PersistError::DirectoryUnavailable {
                path: self.documents_dir.clone(),
            });
        }

        let bytes = tokio::task::spawn_blocking(move || encode_png(&image))
            .await
            .map_err(|e| PersistError::encode(format!("Encode task panicked: {e}")))?
            .map_err(|e| PersistError::encode(e.to_string()))?;

        let (path, mut file) = self.create_unique(name).await?;

        if let Err(e) = Self::write_all(&mut file, &bytes).await {
            drop(file);
            if let Err(remove_err) = fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %remove_err, "Failed to remove partial file");
            }
            return Err(PersistError::io(&path, &e));
        }

        info!(path = %path.display(), size = bytes.len(), "Image saved");
        Ok(path)
    }

    /// Creates a new file, moving to later timestamps while names are taken.
    async fn create_unique(
        &self,
        mut name: SavedFileName,
    ) -> Result<(PathBuf, fs::File), PersistError> {
        for _ in 0..MAX_NAME_ATTEMPTS {
            let path = self.documents_dir.join(name.to_string());
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "File name taken, trying next timestamp");
                    name = name.next();
                }
                Err(e) => return Err(PersistError::io(&path, &e)),
            }
        }

        Err(PersistError::NameCollision {
            attempts: MAX_NAME_ATTEMPTS,
        })
    }

    async fn write_all(file: &mut fs::File, bytes: &[u8]) -> std::io::Result<()> {
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await
    }

    /// Reads and decodes one file; `None` if it is not a decodable image.
    async fn load(path: PathBuf) -> Option<DownloadedImage> {
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unreadable file");
                return None;
            }
        };

        let result = tokio::task::spawn_blocking(move || decode_image(&bytes)).await;
        match result {
            Ok(Ok(image)) => {
                trace!(path = %path.display(), "Decoded saved image");
                Some(DownloadedImage::from_disk(image, path))
            }
            Ok(Err(e)) => {
                debug!(path = %path.display(), error = %e, "Skipping undecodable file");
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Decode task panicked");
                None
            }
        }
    }
}

#[async_trait]
impl ImageStorePort for PngImageStore {
    async fn persist(&self, image: Arc<image::DynamicImage>) -> Result<PathBuf, PersistError> {
        self.persist_as(image, SavedFileName::now()).await
    }

    async fn try_list_saved(&self) -> Result<Vec<DownloadedImage>, ListError> {
        let mut entries = fs::read_dir(&self.documents_dir)
            .await
            .map_err(|e| ListError::io(&self.documents_dir, &e))?;

        let mut paths = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Stopped reading documents directory early");
                    break;
                }
            };

            let path = entry.path();
            if !has_saved_extension(&path) {
                continue;
            }
            if entry.file_type().await.is_ok_and(|t| t.is_file()) {
                paths.push(path);
            }
        }

        paths.sort();

        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(image) = Self::load(path).await {
                images.push(image);
            }
        }

        debug!(
            dir = %self.documents_dir.display(),
            count = images.len(),
            "Listed saved images"
        );
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use tempfile::TempDir;

    fn red_square() -> Arc<DynamicImage> {
        Arc::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            10,
            10,
            Rgb([255, 0, 0]),
        )))
    }

    fn create_test_store() -> (PngImageStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = PngImageStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_persist_names_file_by_timestamp() {
        let (store, _temp) = create_test_store();

        let path = store.persist(red_square()).await.unwrap();

        let file_name = path.file_name().unwrap().to_str().unwrap();
        assert!(SavedFileName::parse(file_name).is_some());
        assert_eq!(path.parent(), Some(store.documents_dir()));
    }

    #[tokio::test]
    async fn test_persist_then_list_round_trips_pixels() {
        let (store, _temp) = create_test_store();
        let image = red_square();

        let path = store.persist(image.clone()).await.unwrap();
        let listed = store.list_saved().await;

        assert_eq!(listed.len(), 1);
        assert_eq!(
            listed[0].origin(),
            &crate::domain::entities::ImageOrigin::Disk { path }
        );
        assert_eq!(listed[0].image().to_rgb8(), image.to_rgb8());
    }

    #[tokio::test]
    async fn test_same_millisecond_does_not_overwrite() {
        let (store, temp) = create_test_store();
        let name = SavedFileName::new(1_000);

        let first = store.persist_as(red_square(), name).await.unwrap();
        let second = store
            .persist_as(Arc::new(DynamicImage::new_rgb8(2, 2)), name)
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(second, temp.path().join("downloaded_image_1001.png"));
        assert_eq!(store.list_saved().await.len(), 2);
    }

    #[tokio::test]
    async fn test_persist_into_missing_directory_fails_without_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let store = PngImageStore::new(missing.clone());

        let result = store.persist(red_square()).await;

        assert!(matches!(
            result,
            Err(PersistError::DirectoryUnavailable { path }) if path == missing
        ));
        assert!(!missing.exists());
    }

    #[tokio::test]
    async fn test_list_ignores_other_files() {
        let (store, temp) = create_test_store();
        let bytes = encode_png(&red_square()).unwrap();
        std::fs::write(temp.path().join("downloaded_image_1.png"), &bytes).unwrap();
        std::fs::write(temp.path().join("note.txt"), b"hello").unwrap();

        let listed = store.list_saved().await;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].width(), 10);
    }

    #[tokio::test]
    async fn test_list_matches_extension_case_insensitively() {
        let (store, temp) = create_test_store();
        let bytes = encode_png(&red_square()).unwrap();
        std::fs::write(temp.path().join("UPPER.PNG"), &bytes).unwrap();
        std::fs::write(temp.path().join("mixed.Png"), &bytes).unwrap();

        assert_eq!(store.list_saved().await.len(), 2);
    }

    #[tokio::test]
    async fn test_list_drops_undecodable_files() {
        let (store, temp) = create_test_store();
        let bytes = encode_png(&red_square()).unwrap();
        std::fs::write(temp.path().join("good.png"), &bytes).unwrap();
        std::fs::write(temp.path().join("corrupt.png"), b"not a png").unwrap();
        std::fs::write(temp.path().join("half.png"), &bytes[..bytes.len() / 2]).unwrap();

        let listed = store.list_saved().await;

        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_list_skips_directories() {
        let (store, temp) = create_test_store();
        std::fs::create_dir(temp.path().join("folder.png")).unwrap();

        assert!(store.list_saved().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let (store, _temp) = create_test_store();
        store
            .persist_as(red_square(), SavedFileName::new(2_000))
            .await
            .unwrap();
        store
            .persist_as(red_square(), SavedFileName::new(1_000))
            .await
            .unwrap();

        let names: Vec<String> = store
            .list_saved()
            .await
            .iter()
            .map(|img| img.label())
            .collect();

        assert_eq!(
            names,
            vec![
                "downloaded_image_1000.png (10x10)",
                "downloaded_image_2000.png (10x10)"
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_directory_lists_empty() {
        let temp = TempDir::new().unwrap();
        let store = PngImageStore::new(temp.path().join("nope"));

        assert!(store.list_saved().await.is_empty());
        assert!(matches!(
            store.try_list_saved().await,
            Err(ListError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_directory_lists_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.try_list_saved().await.unwrap().is_empty());
    }
}
