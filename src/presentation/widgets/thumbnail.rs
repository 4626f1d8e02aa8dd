//! Terminal image rendering state.

use ratatui_image::picker::{Capability, Picker, ProtocolType};
use ratatui_image::protocol::StatefulProtocol;

use crate::domain::entities::DownloadedImage;

/// Longest side, in pixels, handed to the terminal protocol.
pub const THUMBNAIL_MAX_PIXELS: u32 = 512;

/// Items further than this many pages from the viewport drop their protocol.
pub const PROTOCOL_KEEP_PAGES: usize = 2;

/// A listed image together with its lazily built terminal protocol.
pub struct Thumbnail {
    image: DownloadedImage,
    protocol: Option<StatefulProtocol>,
}

impl Thumbnail {
    /// Wraps an image without building its protocol yet.
    #[must_use]
    pub const fn new(image: DownloadedImage) -> Self {
        Self {
            image,
            protocol: None,
        }
    }

    /// Returns the wrapped image.
    #[must_use]
    pub const fn image(&self) -> &DownloadedImage {
        &self.image
    }

    /// Returns whether a protocol is currently held.
    #[must_use]
    pub const fn has_protocol(&self) -> bool {
        self.protocol.is_some()
    }

    /// Builds the protocol on first use and returns it.
    pub fn protocol_mut(&mut self, renderer: &ThumbnailRenderer) -> &mut StatefulProtocol {
        let image = &self.image;
        self.protocol.get_or_insert_with(|| renderer.protocol_for(image))
    }

    /// Releases the encoded protocol.
    pub fn clear_protocol(&mut self) {
        self.protocol = None;
    }
}

impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thumbnail")
            .field("origin", self.image.origin())
            .field("has_protocol", &self.protocol.is_some())
            .finish()
    }
}

/// Owns the terminal graphics picker.
pub struct ThumbnailRenderer {
    picker: Picker,
}

impl ThumbnailRenderer {
    /// Queries the terminal for graphics support. Must run before the
    /// terminal event stream starts reading stdin.
    #[must_use]
    pub fn new() -> Self {
        let mut picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::halfblocks());

        let caps = picker.capabilities();
        let has_sixel = caps.iter().any(|c| matches!(c, Capability::Sixel));
        let has_kitty = caps.iter().any(|c| matches!(c, Capability::Kitty));

        if has_sixel && !has_kitty && picker.protocol_type() == ProtocolType::Halfblocks {
            picker.set_protocol_type(ProtocolType::Sixel);
        }

        Self { picker }
    }

    /// Renderer that only uses unicode half blocks.
    #[must_use]
    pub fn halfblocks() -> Self {
        Self {
            picker: Picker::halfblocks(),
        }
    }

    fn protocol_for(&self, image: &DownloadedImage) -> StatefulProtocol {
        self.picker.new_resize_protocol(protocol_source(image.image()))
    }
}

/// Copy of `source` no larger than [`THUMBNAIL_MAX_PIXELS`] on either side,
/// aspect ratio kept.
fn protocol_source(source: &image::DynamicImage) -> image::DynamicImage {
    if source.width() > THUMBNAIL_MAX_PIXELS || source.height() > THUMBNAIL_MAX_PIXELS {
        source.thumbnail(THUMBNAIL_MAX_PIXELS, THUMBNAIL_MAX_PIXELS)
    } else {
        source.clone()
    }
}

impl Default for ThumbnailRenderer {
    fn default() -> Self {
        Self::new()
    }
}
