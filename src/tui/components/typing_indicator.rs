use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::tui::component::Component;

pub const DOT_COUNT: usize = 3;
/// Rows the indicator occupies below the last message.
pub const HEIGHT: u16 = 1;

const DOT: &str = "●";

/// Three dots shown while a reply is pending. One dot is lit per frame and the
/// lit dot moves left to right as `frame_index` advances.
#[derive(Clone, Copy)]
pub struct TypingIndicator {
    pub frame_index: usize,
}

impl TypingIndicator {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }

    pub fn lit_dot(&self) -> usize {
        self.frame_index % DOT_COUNT
    }

    fn line(&self) -> Line<'static> {
        let lit = self.lit_dot();
        let mut spans = vec![Span::raw(" ")];
        for i in 0..DOT_COUNT {
            let style = if i == lit {
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
            };
            spans.push(Span::styled(DOT, style));
            if i + 1 < DOT_COUNT {
                spans.push(Span::raw(" "));
            }
        }
        Line::from(spans)
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}

impl Component for TypingIndicator {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
