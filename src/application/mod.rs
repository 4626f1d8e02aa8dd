//! Application layer with use cases and task queues.

/// Background execution contexts.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{Executors, QueueError, TaskQueue};
pub use use_cases::{DownloadImageUseCase, ListSavedImagesUseCase};
