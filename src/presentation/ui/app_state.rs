//! Foreground state of the download screen.
//!
//! Background work never touches this state directly. It reports back with
//! an [`Action`] and the foreground applies it, possibly answering with the
//! next [`Command`] to dispatch.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::domain::entities::DownloadedImage;
use crate::domain::errors::DownloadError;
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{ImageListState, StatusCaption, TextInput};

/// Caption shown when nothing is in progress.
pub const IDLE_CAPTION: &str = "Downloaded images are available in the image list.";
/// Caption shown while a fetch is pending.
pub const BUSY_CAPTION: &str = "Downloading...";
/// Key hints shown next to the caption.
pub const KEY_HINTS: &str = "Enter: download · Tab: image list · Esc: quit";

/// Result of background work, applied on the foreground.
#[derive(Debug)]
pub enum Action {
    /// A fetch finished with a decoded image.
    ImageFetched(DownloadedImage),
    /// A fetch failed.
    FetchFailed(DownloadError),
    /// An image was written to the given path.
    ImagePersisted(PathBuf),
    /// Writing an image failed.
    PersistFailed(DownloadError),
    /// The documents directory was scanned.
    SavedImagesListed(Vec<DownloadedImage>),
}

/// Work the foreground asks the background to do.
#[derive(Debug)]
pub enum Command {
    /// Download the given URL on the network queue.
    Fetch(String),
    /// Save the image on the disk queue.
    Persist(DownloadedImage),
    /// Scan the documents directory on the disk queue.
    ListSaved,
    /// Leave the event loop.
    Exit,
}

/// Side panel listing the saved images.
#[derive(Debug, Default)]
pub struct SavedPanel {
    open: bool,
    loading: bool,
    list: ImageListState,
}

impl SavedPanel {
    /// Returns whether the panel is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Returns whether a scan is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the listed images.
    #[must_use]
    pub const fn list(&self) -> &ImageListState {
        &self.list
    }

    /// Returns the listed images mutably, for rendering.
    pub fn list_mut(&mut self) -> &mut ImageListState {
        &mut self.list
    }
}

/// Everything the download screen shows.
#[derive(Debug)]
pub struct AppState {
    url_input: TextInput,
    displayed: ImageListState,
    saved_panel: SavedPanel,
    pending_fetches: usize,
    pending_saves: usize,
    last_error: Option<String>,
    show_errors: bool,
}

impl AppState {
    /// Creates an empty screen. With `show_errors` failures replace the
    /// caption text; otherwise they only reach the log.
    #[must_use]
    pub fn new(show_errors: bool) -> Self {
        let mut url_input = TextInput::new(" Image URL ").placeholder("Enter a link...");
        url_input.set_focused(true);

        Self {
            url_input,
            displayed: ImageListState::new(),
            saved_panel: SavedPanel::default(),
            pending_fetches: 0,
            pending_saves: 0,
            last_error: None,
            show_errors,
        }
    }

    /// Returns the URL input.
    #[must_use]
    pub const fn url_input(&self) -> &TextInput {
        &self.url_input
    }

    /// Returns the images downloaded this session.
    #[must_use]
    pub const fn displayed(&self) -> &ImageListState {
        &self.displayed
    }

    /// Returns the session images mutably, for rendering.
    pub fn displayed_mut(&mut self) -> &mut ImageListState {
        &mut self.displayed
    }

    /// Returns the saved images panel.
    #[must_use]
    pub const fn saved_panel(&self) -> &SavedPanel {
        &self.saved_panel
    }

    /// Returns the saved images panel mutably, for rendering.
    pub fn saved_panel_mut(&mut self) -> &mut SavedPanel {
        &mut self.saved_panel
    }

    /// Number of fetches not yet answered.
    #[must_use]
    pub const fn pending_fetches(&self) -> usize {
        self.pending_fetches
    }

    /// Number of saves not yet answered.
    #[must_use]
    pub const fn pending_saves(&self) -> usize {
        self.pending_saves
    }

    /// Returns the caption for the bottom line.
    #[must_use]
    pub fn status_caption(&self) -> StatusCaption {
        let caption = if let Some(error) = &self.last_error {
            StatusCaption::error(error.as_str())
        } else if self.pending_fetches > 0 {
            StatusCaption::busy(BUSY_CAPTION)
        } else {
            StatusCaption::info(IDLE_CAPTION)
        };
        caption.hint(KEY_HINTS)
    }

    /// Applies a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if !EventHandler::is_press(&key) {
            return None;
        }

        if EventHandler::is_quit_event(&key) {
            return Some(Command::Exit);
        }

        if EventHandler::is_back_event(&key) {
            if self.saved_panel.open {
                self.close_panel();
                return None;
            }
            return Some(Command::Exit);
        }

        if EventHandler::is_toggle_panel_event(&key) {
            return self.toggle_panel();
        }

        if EventHandler::is_submit_event(&key) {
            return if self.saved_panel.open {
                None
            } else {
                self.submit()
            };
        }

        self.handle_navigation(key);
        None
    }

    /// Inserts pasted text into the URL input.
    pub fn handle_paste(&mut self, text: &str) {
        if !self.saved_panel.open {
            self.url_input.insert_str(text);
        }
    }

    /// Applies the outcome of background work.
    pub fn handle_action(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::ImageFetched(image) => {
                self.pending_fetches = self.pending_fetches.saturating_sub(1);
                self.last_error = None;
                self.displayed.push(image.clone());
                self.pending_saves += 1;
                Some(Command::Persist(image))
            }
            Action::FetchFailed(error) => {
                self.pending_fetches = self.pending_fetches.saturating_sub(1);
                self.record_failure(&error);
                None
            }
            Action::ImagePersisted(path) => {
                self.pending_saves = self.pending_saves.saturating_sub(1);
                info!(path = %path.display(), "Image saved");
                None
            }
            Action::PersistFailed(error) => {
                self.pending_saves = self.pending_saves.saturating_sub(1);
                self.record_failure(&error);
                None
            }
            Action::SavedImagesListed(images) => {
                if self.saved_panel.open {
                    self.saved_panel.list.replace(images);
                    self.saved_panel.loading = false;
                } else {
                    debug!(count = images.len(), "Dropping listing for closed panel");
                }
                None
            }
        }
    }

    fn record_failure(&mut self, error: &DownloadError) {
        if self.show_errors {
            self.last_error = Some(error.to_string());
        }
    }

    fn submit(&mut self) -> Option<Command> {
        let url = self.url_input.value().trim();
        if url.is_empty() {
            return None;
        }

        let url = url.to_string();
        self.pending_fetches += 1;
        self.last_error = None;
        Some(Command::Fetch(url))
    }

    fn toggle_panel(&mut self) -> Option<Command> {
        if self.saved_panel.open {
            self.close_panel();
            return None;
        }

        self.saved_panel.open = true;
        self.saved_panel.loading = true;
        self.saved_panel.list.clear();
        self.url_input.set_focused(false);
        Some(Command::ListSaved)
    }

    fn close_panel(&mut self) {
        self.saved_panel.open = false;
        self.saved_panel.loading = false;
        self.url_input.set_focused(true);
    }

    fn handle_navigation(&mut self, key: KeyEvent) {
        let panel_open = self.saved_panel.open;
        let list = if panel_open {
            &mut self.saved_panel.list
        } else {
            &mut self.displayed
        };

        match key.code {
            KeyCode::Up => list.scroll_up(),
            KeyCode::Down => list.scroll_down(),
            KeyCode::PageUp => list.scroll_to_top(),
            KeyCode::PageDown => list.scroll_to_bottom(),
            _ if !panel_open => self.handle_edit(key),
            _ => {}
        }
    }

    fn handle_edit(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.url_input.input_char(c);
            }
            KeyCode::Backspace => self.url_input.backspace(),
            KeyCode::Delete => self.url_input.delete(),
            KeyCode::Left => self.url_input.move_left(),
            KeyCode::Right => self.url_input.move_right(),
            KeyCode::Home => self.url_input.move_start(),
            KeyCode::End => self.url_input.move_end(),
            _ => {}
        }
    }
}
