//! Main application orchestrator.

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::app_state::{Action, AppState, Command};
use super::main_screen::MainScreen;
use crate::application::use_cases::{DownloadImageUseCase, ListSavedImagesUseCase};
use crate::domain::entities::DownloadedImage;
use crate::infrastructure::UiConfig;
use crate::presentation::widgets::ThumbnailRenderer;

/// Owns the screen state and turns its commands into background work.
pub struct App {
    state: AppState,
    download: DownloadImageUseCase,
    list_saved: ListSavedImagesUseCase,
    ui_config: UiConfig,
    renderer: Option<ThumbnailRenderer>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    running: bool,
}

impl App {
    /// Creates the application.
    #[must_use]
    pub fn new(
        download: DownloadImageUseCase,
        list_saved: ListSavedImagesUseCase,
        ui_config: UiConfig,
        show_errors: bool,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::new(show_errors),
            download,
            list_saved,
            ui_config,
            renderer: None,
            action_tx,
            action_rx,
            running: true,
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        // The graphics query reads stdin, so it has to finish before the
        // event stream starts.
        if self.ui_config.image_preview {
            self.renderer = Some(ThumbnailRenderer::new());
        }

        self.run_event_loop(terminal).await?;

        info!(
            pending_fetches = self.state.pending_fetches(),
            pending_saves = self.state.pending_saves(),
            "Application exiting normally"
        );
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    if let Some(command) = self.state.handle_action(action) {
                        self.dispatch(command);
                    }
                }

                event = terminal_events.next() => {
                    match event {
                        Some(Ok(event)) => self.handle_terminal_event(event),
                        Some(Err(e)) => warn!(error = %e, "Terminal event error"),
                        None => self.running = false,
                    }
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) {
        let command = match event {
            Event::Key(key) => self.state.handle_key(key),
            Event::Paste(text) => {
                self.state.handle_paste(&text);
                None
            }
            _ => None,
        };

        if let Some(command) = command {
            self.dispatch(command);
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let screen = MainScreen::new(self.renderer.as_ref(), self.ui_config.thumbnail_height);
        frame.render_stateful_widget(screen, frame.area(), &mut self.state);
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::Fetch(url) => self.spawn_fetch(url),
            Command::Persist(image) => self.spawn_persist(image),
            Command::ListSaved => self.spawn_list_saved(),
            Command::Exit => self.running = false,
        }
    }

    // Jobs are queued here, on the event loop, so they keep submission
    // order. Only the wait for the result is spawned.
    fn spawn_fetch(&self, url: String) {
        debug!(url = %url, "Submitting download");
        let pending = self.download.fetch(&url);
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let action = match pending.await {
                Ok(image) => Action::ImageFetched(image),
                Err(e) => Action::FetchFailed(e),
            };
            let _ = tx.send(action);
        });
    }

    fn spawn_persist(&self, image: DownloadedImage) {
        let pending = self.download.persist(&image);
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let action = match pending.await {
                Ok(path) => Action::ImagePersisted(path),
                Err(e) => Action::PersistFailed(e),
            };
            let _ = tx.send(action);
        });
    }

    fn spawn_list_saved(&self) {
        let pending = self.list_saved.execute();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let _ = tx.send(Action::SavedImagesListed(pending.await));
        });
    }
}
