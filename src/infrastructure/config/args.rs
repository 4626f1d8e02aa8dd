use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments. Every flag overrides the config file.
#[derive(Debug, Parser)]
#[command(
    name = "imgdrop",
    version,
    about = "Download images by URL and keep a copy in your documents folder",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Directory images are saved to and listed from.
    #[arg(short, long, value_name = "DIR", env = "IMGDROP_DOCUMENTS_DIR")]
    pub documents_dir: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Show download and save failures in the status caption.
    #[arg(long)]
    pub show_errors: Option<bool>,

    /// Render thumbnails instead of labels only.
    #[arg(long)]
    pub image_preview: Option<bool>,

    /// Rows given to each thumbnail.
    #[arg(long)]
    pub thumbnail_height: Option<u16>,
}
