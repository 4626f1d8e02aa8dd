//! Infrastructure layer with adapters for the network and the filesystem.

/// Application configuration.
pub mod config;
/// Image handling (download, encode, documents directory store).
pub mod image;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager, UiConfig};
pub use image::{FetcherConfig, HttpImageFetcher, PngImageStore, resolve_documents_dir};
