//! # InputBox Component
//!
//! Single text input at the bottom of the screen.
//!
//! ## Responsibilities
//!
//! - Capture text input and paste
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit `Submit` with the trimmed text when Enter is pressed
//!
//! ## State Management
//!
//! The buffer is internal state. It is NOT cleared on submit: the parent calls
//! [`InputBox::clear`] once the reducer accepted the message, so a submit that
//! is rejected (a reply is still pending) keeps what the user typed.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    wrap_line_count, wrap_options,
};

const PLACEHOLDER: &str = "Ask anything…";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed with non-blank text; carries the trimmed text
    Submit(String),
    /// Buffer or cursor changed
    ContentChanged,
}

pub struct InputBox {
    buffer: String,
    cursor: CursorState,
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: CursorState::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    /// Height needed for the current buffer, in [1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD].
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let content_lines = wrap_line_count(&self.buffer, inner_width(content_width));
        content_lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn visible_text(&self, content_width: u16) -> String {
        if self.cursor.scroll_offset == 0 {
            return self.buffer.clone();
        }

        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }

        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }

    fn line_start(&self) -> usize {
        self.buffer[..self.cursor.pos]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn line_end(&self) -> usize {
        self.buffer[self.cursor.pos..]
            .find('\n')
            .map(|i| self.cursor.pos + i)
            .unwrap_or(self.buffer.len())
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (self.cursor.pos != pos).then(|| {
            self.cursor.pos = pos;
            InputEvent::ContentChanged
        })
    }
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(ratatui::widgets::Padding::horizontal(1))
            .title("Message");

        let input = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.visible_text(area.width)).style(Style::default().fg(Color::White))
        };

        frame.render_widget(input.block(block), area);

        let (cursor_x, cursor_y) = self.cursor.screen_pos(&self.buffer, area);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Normalise CRLF from some terminals
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(self.cursor.pos, &text);
                self.cursor.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.move_to(prev)
            }
            TuiEvent::CursorRight => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.move_to(next)
            }
            TuiEvent::CursorHome => {
                let start = self.line_start();
                self.move_to(start)
            }
            TuiEvent::CursorEnd => {
                let end = self.line_end();
                self.move_to(end)
            }
            TuiEvent::Submit => {
                let trimmed = self.buffer.trim();
                (!trimmed.is_empty()).then(|| InputEvent::Submit(trimmed.to_string()))
            }
            _ => None,
        }
    }
}
