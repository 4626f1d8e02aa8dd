//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use crate::infrastructure::image::{FetcherConfig, resolve_documents_dir};

const APP_NAME: &str = "imgdrop";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory images are saved to and listed from.
    /// Defaults to the platform documents directory.
    #[serde(default)]
    pub documents_dir: Option<PathBuf>,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Show download and save failures in the status caption.
    #[serde(default)]
    pub show_errors: bool,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Render thumbnails. When false only labels are listed.
    #[serde(default = "default_true")]
    pub image_preview: bool,

    /// Terminal rows given to each picture, below its label.
    #[serde(default = "default_thumbnail_height")]
    pub thumbnail_height: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            image_preview: true,
            thumbnail_height: default_thumbnail_height(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_thumbnail_height() -> u16 {
    12
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(documents_dir) = args.documents_dir {
            self.documents_dir = Some(documents_dir);
        }
        if let Some(timeout) = args.request_timeout_secs {
            self.request_timeout_secs = Some(timeout);
        }
        if let Some(show_errors) = args.show_errors {
            self.show_errors = show_errors;
        }
        if let Some(image_preview) = args.image_preview {
            self.ui.image_preview = image_preview;
        }
        if let Some(thumbnail_height) = args.thumbnail_height {
            self.ui.thumbnail_height = thumbnail_height;
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("imgdrop.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns the directory images are saved to.
    #[must_use]
    pub fn effective_documents_dir(&self) -> Option<PathBuf> {
        resolve_documents_dir(self.documents_dir.as_deref())
    }

    /// Builds the HTTP fetcher configuration.
    #[must_use]
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..FetcherConfig::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            documents_dir: None,
            request_timeout_secs: None,
            show_errors: false,
            ui: UiConfig::default(),
        }
    }
}
