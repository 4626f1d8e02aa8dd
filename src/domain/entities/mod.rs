//! Domain entity definitions.

mod image;
mod saved_file;

pub use image::{DownloadedImage, ImageOrigin};
pub use saved_file::{
    SAVED_FILE_EXTENSION, SAVED_FILE_PREFIX, SavedFileName, has_saved_extension,
};
