//! Workflow level errors.

use thiserror::Error;

use super::{FetchError, PersistError};

/// Failure of one step of the download workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum DownloadError {
    #[error("no url entered")]
    BlankUrl,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("{queue} queue is closed")]
    QueueClosed { queue: String },
}

impl DownloadError {
    /// Creates queue closed error.
    #[must_use]
    pub fn queue_closed(queue: impl Into<String>) -> Self {
        Self::QueueClosed {
            queue: queue.into(),
        }
    }

    /// Returns whether the error came from user input rather than I/O.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::BlankUrl | Self::Fetch(FetchError::InvalidUrl { .. }))
    }
}
