//! The single download screen.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, StatefulWidget, Widget},
};

use super::app_state::AppState;
use crate::presentation::widgets::{ImageList, ThumbnailRenderer};

const TITLE: &str = "Image downloads";
const PANEL_TITLE: &str = "Image list";
const PANEL_MIN_WIDTH: u16 = 32;

/// Header, URL input, the session's images, the caption and, when open,
/// the saved images panel on top.
pub struct MainScreen<'a> {
    renderer: Option<&'a ThumbnailRenderer>,
    thumbnail_rows: u16,
}

impl<'a> MainScreen<'a> {
    /// Creates the screen. Without a renderer images are listed by label only.
    #[must_use]
    pub const fn new(renderer: Option<&'a ThumbnailRenderer>, thumbnail_rows: u16) -> Self {
        Self {
            renderer,
            thumbnail_rows,
        }
    }

    fn render_header(area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(vec![
            Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  [Tab] image list", Style::default().fg(Color::DarkGray)),
        ]))
        .render(area, buf);
    }

    fn render_button(area: Rect, buf: &mut Buffer, busy: bool) {
        let style = if busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        };
        Paragraph::new(Line::from(Span::styled(" [Enter] Download image ", style)))
            .centered()
            .render(area, buf);
    }

    fn panel_area(area: Rect) -> Rect {
        let width = (area.width * 2 / 5).max(PANEL_MIN_WIDTH).min(area.width);
        Rect { width, ..area }
    }
}

impl StatefulWidget for MainScreen<'_> {
    type State = AppState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ]);
        let [header_area, input_area, button_area, list_area, caption_area] =
            layout.areas(area);

        Self::render_header(header_area, buf);
        state.url_input().render(input_area, buf);
        Self::render_button(button_area, buf, state.pending_fetches() > 0);

        ImageList::new("Downloaded")
            .empty_text("Paste an image link and press Enter.")
            .thumbnails(self.renderer, self.thumbnail_rows)
            .focused(!state.saved_panel().is_open())
            .render(list_area, buf, state.displayed_mut());

        (&state.status_caption()).render(caption_area, buf);

        if state.saved_panel().is_open() {
            let panel_area = Self::panel_area(Rect {
                height: area.height.saturating_sub(1),
                ..area
            });
            Clear.render(panel_area, buf);

            let empty_text = if state.saved_panel().is_loading() {
                "Loading..."
            } else {
                "No saved images."
            };
            ImageList::new(PANEL_TITLE)
                .empty_text(empty_text)
                .thumbnails(self.renderer, self.thumbnail_rows)
                .focused(true)
                .render(panel_area, buf, state.saved_panel_mut().list_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DownloadedImage;
    use crate::presentation::ui::app_state::{Action, IDLE_CAPTION};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    fn render_lines(state: &mut AppState, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        MainScreen::new(None, 4).render(area, &mut buf, state);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    fn tab() -> KeyEvent {
        KeyEvent::new_with_kind(KeyCode::Tab, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn saved(name: &str) -> DownloadedImage {
        DownloadedImage::from_disk(image::DynamicImage::new_rgb8(3, 3), format!("/docs/{name}"))
    }

    #[test]
    fn test_initial_screen() {
        let mut state = AppState::new(false);
        let lines = render_lines(&mut state, 80, 12);

        assert!(lines[0].contains(TITLE));
        assert!(lines[2].contains("Enter a link..."));
        assert!(lines[4].contains("Download image"));
        assert!(lines[11].contains(IDLE_CAPTION));
    }

    #[test]
    fn test_downloaded_images_are_listed() {
        let mut state = AppState::new(false);
        state.handle_action(Action::ImageFetched(DownloadedImage::from_network(
            image::DynamicImage::new_rgb8(10, 10),
            "http://example.com/red.png",
        )));

        let lines = render_lines(&mut state, 80, 12);

        assert!(lines.iter().any(|l| l.contains("1. red.png (10x10)")));
    }

    #[test]
    fn test_panel_shows_loading_then_files() {
        let mut state = AppState::new(false);
        state.handle_key(tab());

        let lines = render_lines(&mut state, 100, 12);
        assert!(lines.iter().any(|l| l.contains(PANEL_TITLE)));
        assert!(lines.iter().any(|l| l.contains("Loading...")));

        state.handle_action(Action::SavedImagesListed(vec![saved(
            "downloaded_image_1.png",
        )]));
        let lines = render_lines(&mut state, 100, 12);
        assert!(
            lines
                .iter()
                .any(|l| l.contains("1. downloaded_image_1.png (3x3)"))
        );
    }

    #[test]
    fn test_panel_fits_narrow_terminal() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(MainScreen::panel_area(area).width, 20);

        let wide = Rect::new(0, 0, 100, 10);
        assert_eq!(MainScreen::panel_area(wide).width, 40);
    }
}
