//! Errors raised by the documents directory store.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while writing an image to the documents directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum PersistError {
    #[error("documents directory {} is not available", .path.display())]
    DirectoryUnavailable { path: PathBuf },

    #[error("failed to encode image as png: {message}")]
    Encode { message: String },

    #[error("failed to write {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("no free file name after {attempts} attempts")]
    NameCollision { attempts: u32 },
}

impl PersistError {
    /// Creates encode error.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Creates io error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

/// Failure while scanning the documents directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ListError {
    #[error("failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

impl ListError {
    /// Creates io error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: error.to_string(),
        }
    }
}
