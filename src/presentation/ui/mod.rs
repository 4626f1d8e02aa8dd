//! UI screens.

mod app;
mod app_state;
mod main_screen;

pub use app::App;
pub use app_state::{Action, AppState, BUSY_CAPTION, Command, IDLE_CAPTION, SavedPanel};
pub use main_screen::MainScreen;
