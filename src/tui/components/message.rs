use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Message, Sender};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

pub const USER_TITLE: &str = "● you";
pub const BOT_TITLE: &str = "◆ bot";
pub const OFFLINE_TAG: &str = " · offline";

const TAB_WIDTH: usize = 4;

/// A stateless view of one conversation message.
///
/// Created fresh each frame by `MessageList`. Title and colour depend on the
/// sender; bot replies produced by the offline fallback get a dim tag after the
/// title.
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height with
/// `textwrap` using options that match `Paragraph`'s wrapping, so the list can lay
/// out every message without rendering it.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let content = display_text(message.text());
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(&content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn title(&self) -> Line<'static> {
        let style = sender_style(self.message.sender());
        match self.message.sender() {
            Sender::User => Line::from(Span::styled(USER_TITLE, style)),
            Sender::Bot if self.message.is_fallback() => Line::from(vec![
                Span::styled(BOT_TITLE, style),
                Span::styled(
                    OFFLINE_TAG,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]),
            Sender::Bot => Line::from(Span::styled(BOT_TITLE, style)),
        }
    }
}

fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Green),
        Sender::Bot => Style::default().fg(Color::Blue),
    }
}

/// Text as it is shown on screen: trimmed, tabs expanded, and every other
/// control character replaced so message text cannot emit terminal sequences.
pub fn display_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str(&" ".repeat(TAB_WIDTH)),
            '\r' => {}
            c if c.is_control() => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    out
}

impl<'a> Widget for MessageView<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = sender_style(self.message.sender());
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(display_text(self.message.text()))
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for MessageView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
