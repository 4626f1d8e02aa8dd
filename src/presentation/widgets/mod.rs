mod image_list;
mod input;
mod status_caption;
mod thumbnail;

pub use image_list::{ImageList, ImageListState};
pub use input::TextInput;
pub use status_caption::{CaptionLevel, StatusCaption};
pub use thumbnail::{THUMBNAIL_MAX_PIXELS, Thumbnail, ThumbnailRenderer};
