use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use imgdrop::application::services::Executors;
use imgdrop::application::use_cases::{DownloadImageUseCase, ListSavedImagesUseCase};
use imgdrop::infrastructure::{AppConfig, CliArgs, HttpImageFetcher, PngImageStore, StorageManager};
use imgdrop::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_names(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn create_app(config: &AppConfig) -> Result<App> {
    let documents_dir = config
        .effective_documents_dir()
        .ok_or_else(|| eyre!("could not determine a documents directory, set documents_dir"))?;
    info!(path = %documents_dir.display(), "Using documents directory");

    let fetcher = Arc::new(HttpImageFetcher::new(&config.fetcher_config())?);
    let store = Arc::new(PngImageStore::new(documents_dir));
    let executors = Arc::new(Executors::new()?);

    let download = DownloadImageUseCase::new(fetcher, store.clone(), executors.clone());
    let list_saved = ListSavedImagesUseCase::new(store, executors);

    Ok(App::new(
        download,
        list_saved,
        config.ui.clone(),
        config.show_errors,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = load_config()?;
    init_logging(&config)?;

    info!(version = imgdrop::VERSION, "Starting imgdrop");

    let app = create_app(&config)?;

    let mut terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableBracketedPaste)?;

    let result = app.run(&mut terminal).await;

    let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();

    result
}
