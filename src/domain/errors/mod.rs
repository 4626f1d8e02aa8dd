//! Domain error types.

mod download_error;
mod fetch_error;
mod storage_error;

pub use download_error::DownloadError;
pub use fetch_error::FetchError;
pub use storage_error::{ListError, PersistError};
