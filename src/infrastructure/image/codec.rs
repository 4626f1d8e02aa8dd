//! Image decoding and PNG encoding.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader, ImageResult};

/// Decodes `bytes`, detecting the format from the content.
///
/// # Errors
/// Returns error if the format is unknown or the data is malformed.
pub fn decode_image(bytes: &[u8]) -> ImageResult<DynamicImage> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()
}

/// Encodes `image` as PNG. PNG is lossless, so this is the maximum quality.
///
/// # Errors
/// Returns error if the pixel layout cannot be written as PNG.
pub fn encode_png(image: &DynamicImage) -> ImageResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
