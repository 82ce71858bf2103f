//! Cursor bookkeeping for the input box: byte offset into the buffer and
//! the first visible wrapped line.

use super::text_wrap::{
    CONTENT_OFFSET, MAX_VISIBLE_LINES, inner_width, wrap_line_count, wrap_options,
};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

pub(super) struct CursorState {
    /// Byte offset in the buffer (0..=buffer.len()), always on a char boundary
    pub pos: usize,
    /// First visible wrapped line (0 when everything fits)
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Wrapped line (0-based) the cursor sits on.
    pub fn line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 || self.pos == 0 {
            return 0;
        }
        wrap_line_count(&buffer[..self.pos], width).saturating_sub(1)
    }

    /// Keep the cursor line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let total_lines = wrap_line_count(buffer, inner_width(content_width));
        if total_lines <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.line(buffer, content_width);
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Screen (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let origin = (area.x + CONTENT_OFFSET, area.y + 1);
        if width == 0 {
            return origin;
        }

        let before = &buffer[..self.pos];
        let row = self.line(buffer, area.width);

        // Column: width of the text after the last wrap point on this logical line.
        // textwrap drops trailing spaces, so measure from the source text instead.
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let logical = &before[line_start..];
        let segments = textwrap::wrap(logical, wrap_options(width));
        let consumed: usize = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .map(|seg| seg.chars().count())
            .sum();
        let tail: String = logical.chars().skip(consumed).collect();
        let col = (tail.trim_start().width() as u16).min(width);

        let visible_row = row.saturating_sub(self.scroll_offset);
        (origin.0 + col, origin.1 + visible_row)
    }
}
