//! Scrollable list of image thumbnails.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};
use ratatui_image::{Resize, StatefulImage};

use super::thumbnail::{PROTOCOL_KEEP_PAGES, Thumbnail, ThumbnailRenderer};
use crate::domain::entities::DownloadedImage;

/// Items and scroll position of an [`ImageList`].
#[derive(Debug)]
pub struct ImageListState {
    items: Vec<Thumbnail>,
    offset: usize,
    follow_tail: bool,
}

impl ImageListState {
    /// Creates an empty list that keeps the newest item in view.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            offset: 0,
            follow_tail: true,
        }
    }

    /// Appends an image at the end.
    pub fn push(&mut self, image: DownloadedImage) {
        self.items.push(Thumbnail::new(image));
    }

    /// Replaces all items and scrolls to the top.
    pub fn replace(&mut self, images: Vec<DownloadedImage>) {
        self.items = images.into_iter().map(Thumbnail::new).collect();
        self.offset = 0;
        self.follow_tail = false;
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.offset = 0;
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the first visible item.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Scrolls one item up.
    pub fn scroll_up(&mut self) {
        self.follow_tail = false;
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scrolls one item down.
    pub fn scroll_down(&mut self) {
        self.offset = (self.offset + 1).min(self.items.len().saturating_sub(1));
    }

    /// Jumps to the first item.
    pub fn scroll_to_top(&mut self) {
        self.follow_tail = false;
        self.offset = 0;
    }

    /// Jumps to the last item and keeps following new ones.
    pub fn scroll_to_bottom(&mut self) {
        self.follow_tail = true;
    }

    fn clamp(&mut self, visible: usize) {
        let max_offset = self.items.len().saturating_sub(visible);
        if self.follow_tail {
            self.offset = max_offset;
        } else {
            self.offset = self.offset.min(max_offset);
        }
    }

    fn release_distant(&mut self, visible: usize) {
        let keep = visible * PROTOCOL_KEEP_PAGES;
        let first = self.offset.saturating_sub(keep);
        let last = self.offset + visible + keep;
        for (index, item) in self.items.iter_mut().enumerate() {
            if index < first || index >= last {
                item.clear_protocol();
            }
        }
    }
}

impl Default for ImageListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders each image as a numbered label followed by its picture.
///
/// Without a renderer only the labels are drawn.
pub struct ImageList<'a> {
    title: &'a str,
    empty_text: &'a str,
    image_rows: u16,
    focused: bool,
    renderer: Option<&'a ThumbnailRenderer>,
}

impl<'a> ImageList<'a> {
    /// Creates a list with the given border title.
    #[must_use]
    pub const fn new(title: &'a str) -> Self {
        Self {
            title,
            empty_text: "",
            image_rows: 0,
            focused: false,
            renderer: None,
        }
    }

    /// Text shown when there is nothing to list.
    #[must_use]
    pub const fn empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = text;
        self
    }

    /// Enables pictures, `rows` terminal rows tall.
    #[must_use]
    pub const fn thumbnails(
        mut self,
        renderer: Option<&'a ThumbnailRenderer>,
        rows: u16,
    ) -> Self {
        self.renderer = renderer;
        self.image_rows = rows;
        self
    }

    /// Highlights the border.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    const fn row_height(&self) -> u16 {
        if self.renderer.is_some() {
            self.image_rows.saturating_add(1)
        } else {
            1
        }
    }

    fn render_item(&self, index: usize, item: &mut Thumbnail, area: Rect, buf: &mut Buffer) {
        let label = Line::from(vec![
            Span::styled(format!("{}. ", index + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(
                item.image().label(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(label).render(Rect { height: 1, ..area }, buf);

        let Some(renderer) = self.renderer else {
            return;
        };
        if area.height < 2 || area.width < 3 {
            return;
        }

        let image_area = Rect::new(area.x + 2, area.y + 1, area.width - 2, area.height - 1);
        StatefulWidget::render(
            StatefulImage::default().resize(Resize::Fit(None)),
            image_area,
            buf,
            item.protocol_mut(renderer),
        );
    }
}

impl StatefulWidget for ImageList<'_> {
    type State = ImageListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.title));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if state.items.is_empty() {
            Paragraph::new(self.empty_text)
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        let row_height = self.row_height();
        let visible = usize::from((inner.height / row_height).max(1));
        state.clamp(visible);

        let end = (state.offset + visible).min(state.items.len());
        let mut y = inner.y;
        for index in state.offset..end {
            let rows_left = inner.bottom().saturating_sub(y);
            if rows_left == 0 {
                break;
            }
            let item_area = Rect::new(inner.x, y, inner.width, row_height.min(rows_left));
            self.render_item(index, &mut state.items[index], item_area, buf);
            y += item_area.height;
        }

        state.release_distant(visible);
    }
}
