//! # TitleBar Component
//!
//! Single-line status bar at the top of the screen.
//!
//! Shows the model name, the current status message, and a "↓ New" hint when
//! the user has scrolled away from the bottom of the conversation.
//!
//! The text degrades by priority so the model name always fits:
//!
//! 1. `"Chatbox (model: X) | Thinking… | ↓ New"`
//! 2. `"Chatbox (model: X) | Thinking…"`
//! 3. `"Chatbox (model: X)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

/// Stateless title bar; all fields are props.
pub struct TitleBar<'a> {
    pub model_name: &'a str,
    pub status_message: &'a str,
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(model_name: &'a str, status_message: &'a str, has_unseen_content: bool) -> Self {
        Self {
            model_name,
            status_message,
            has_unseen_content,
        }
    }

    pub fn text(&self) -> String {
        self.build(true, true)
    }

    /// The richest variant that fits in `width` columns.
    pub fn fit_text(&self, width: u16) -> String {
        [(true, true), (true, false)]
            .into_iter()
            .map(|(status, hint)| self.build(status, hint))
            .find(|title| title.width() <= width as usize)
            .unwrap_or_else(|| self.build(false, false))
    }

    fn build(&self, with_status: bool, with_hint: bool) -> String {
        let mut title = format!("Chatbox (model: {})", self.model_name);
        if with_status && !self.status_message.is_empty() {
            title.push_str(" | ");
            title.push_str(self.status_message);
        }
        if with_hint && self.has_unseen_content {
            title.push_str(" | ↓ New");
        }
        title
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let span = Span::styled(self.fit_text(area.width), Style::default().fg(Color::Gray));
        frame.render_widget(span, area);
    }
}
