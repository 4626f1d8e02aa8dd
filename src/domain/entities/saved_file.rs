//! Naming scheme for persisted images.

use std::path::Path;

/// Prefix shared by every file the persister writes.
pub const SAVED_FILE_PREFIX: &str = "downloaded_image_";

/// Extension of persisted files (PNG, compared case-insensitively).
pub const SAVED_FILE_EXTENSION: &str = "png";

/// Name of a persisted image: `downloaded_image_<epoch-millis>.png`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SavedFileName {
    timestamp_millis: i64,
}

impl SavedFileName {
    /// Creates a name for the given wall-clock time in milliseconds.
    #[must_use]
    pub const fn new(timestamp_millis: i64) -> Self {
        Self { timestamp_millis }
    }

    /// Creates a name for the current time.
    #[must_use]
    pub fn now() -> Self {
        Self::new(chrono::Utc::now().timestamp_millis())
    }

    /// Returns the encoded timestamp.
    #[must_use]
    pub const fn timestamp_millis(self) -> i64 {
        self.timestamp_millis
    }

    /// Returns the name one millisecond later.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::new(self.timestamp_millis.saturating_add(1))
    }

    /// Parses a file name produced by [`SavedFileName`].
    #[must_use]
    pub fn parse(file_name: &str) -> Option<Self> {
        let (stem, ext) = file_name.rsplit_once('.')?;
        if !ext.eq_ignore_ascii_case(SAVED_FILE_EXTENSION) {
            return None;
        }
        let digits = stem.strip_prefix(SAVED_FILE_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Self::new)
    }
}

impl std::fmt::Display for SavedFileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{SAVED_FILE_PREFIX}{}.{SAVED_FILE_EXTENSION}",
            self.timestamp_millis
        )
    }
}

/// Returns true if `path` has the persisted extension, ignoring case.
#[must_use]
pub fn has_saved_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SAVED_FILE_EXTENSION))
}
