//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{DownloadedImage, ImageOrigin, SavedFileName};
pub use errors::{DownloadError, FetchError, ListError, PersistError};
pub use ports::{ImageFetcherPort, ImageStorePort};
