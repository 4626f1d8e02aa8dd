//! Domain types for downloaded and saved images.

use std::path::PathBuf;
use std::sync::Arc;

/// Where a decoded image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOrigin {
    /// Downloaded from the given URL during this session.
    Network {
        /// URL the bytes were fetched from.
        url: String,
    },
    /// Decoded from a file in the documents directory.
    Disk {
        /// Path of the decoded file.
        path: PathBuf,
    },
}

impl std::fmt::Display for ImageOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network { url } => write!(f, "{url}"),
            Self::Disk { path } => write!(f, "{}", path.display()),
        }
    }
}

/// A decoded bitmap together with its origin.
///
/// Cloning is cheap: the pixel data is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct DownloadedImage {
    image: Arc<image::DynamicImage>,
    origin: ImageOrigin,
}

impl DownloadedImage {
    /// Wraps an image fetched from `url`.
    #[must_use]
    pub fn from_network(image: image::DynamicImage, url: impl Into<String>) -> Self {
        Self {
            image: Arc::new(image),
            origin: ImageOrigin::Network { url: url.into() },
        }
    }

    /// Wraps an image decoded from `path`.
    #[must_use]
    pub fn from_disk(image: image::DynamicImage, path: impl Into<PathBuf>) -> Self {
        Self {
            image: Arc::new(image),
            origin: ImageOrigin::Disk { path: path.into() },
        }
    }

    /// Returns the shared pixel data.
    #[must_use]
    pub fn image(&self) -> &Arc<image::DynamicImage> {
        &self.image
    }

    /// Returns where the image came from.
    #[must_use]
    pub const fn origin(&self) -> &ImageOrigin {
        &self.origin
    }

    /// Returns the width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Returns the height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Short human readable label, e.g. `a.png (10x10)`.
    #[must_use]
    pub fn label(&self) -> String {
        let name = match &self.origin {
            ImageOrigin::Network { url } => url
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .unwrap_or(url.as_str())
                .to_string(),
            ImageOrigin::Disk { path } => path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned()),
        };
        format!("{name} ({}x{})", self.width(), self.height())
    }
}
