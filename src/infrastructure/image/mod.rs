//! Image handling infrastructure.
//!
//! This module provides:
//! - Format-sniffing decode and PNG encode
//! - HTTP download of remote images
//! - The documents directory store (persist and list)

pub mod codec;
pub mod documents_dir;
pub mod http_fetcher;
pub mod png_store;

pub use codec::{decode_image, encode_png};
pub use documents_dir::resolve_documents_dir;
pub use http_fetcher::{FetcherConfig, HttpImageFetcher};
pub use png_store::{MAX_NAME_ATTEMPTS, PngImageStore};
