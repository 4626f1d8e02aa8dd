//! Use case implementations.

mod download_image_use_case;
mod list_saved_images_use_case;

pub use download_image_use_case::DownloadImageUseCase;
pub use list_saved_images_use_case::ListSavedImagesUseCase;
