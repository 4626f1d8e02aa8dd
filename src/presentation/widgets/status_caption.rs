//! Bottom status caption.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Caption severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionLevel {
    /// Resting message.
    Info,
    /// Background work in progress.
    Busy,
    /// Last operation failed.
    Error,
}

impl CaptionLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Busy => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// One-line caption: a message on the left, key hints on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCaption {
    message: String,
    hint: String,
    level: CaptionLevel,
}

impl StatusCaption {
    /// Creates a caption with the given level.
    #[must_use]
    pub fn new(message: impl Into<String>, level: CaptionLevel) -> Self {
        Self {
            message: message.into(),
            hint: String::new(),
            level,
        }
    }

    /// Creates info caption.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, CaptionLevel::Info)
    }

    /// Creates busy caption.
    #[must_use]
    pub fn busy(message: impl Into<String>) -> Self {
        Self::new(message, CaptionLevel::Busy)
    }

    /// Creates error caption.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, CaptionLevel::Error)
    }

    /// Sets right-aligned hint text.
    #[must_use]
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the level.
    #[must_use]
    pub const fn level(&self) -> CaptionLevel {
        self.level
    }
}

impl Widget for &StatusCaption {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);
        let hint_style = Style::default().fg(Color::DarkGray);

        let width = area.width as usize;
        let message_width = self.message.width();
        let hint_width = self.hint.width();

        let mut spans = vec![Span::styled(self.message.as_str(), style)];

        // Hints give way to the message on narrow terminals.
        if !self.hint.is_empty() && message_width + 1 + hint_width <= width {
            let padding = width - message_width - hint_width;
            spans.push(Span::raw(" ".repeat(padding)));
            spans.push(Span::styled(self.hint.as_str(), hint_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_line(caption: &StatusCaption, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        caption.render(area, &mut buf);
        (0..width)
            .map(|x| buf[(x, 0u16)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_hint_is_right_aligned() {
        let caption = StatusCaption::info("ok").hint("Esc quit");
        assert_eq!(render_line(&caption, 14), "ok    Esc quit");
    }

    #[test]
    fn test_hint_dropped_when_narrow() {
        let caption = StatusCaption::info("downloading").hint("Esc quit");
        assert_eq!(render_line(&caption, 12).trim_end(), "downloading");
    }

    #[test]
    fn test_levels_have_distinct_colors() {
        assert_ne!(CaptionLevel::Info.color(), CaptionLevel::Error.color());
        assert_eq!(StatusCaption::error("x").level(), CaptionLevel::Error);
    }
}
