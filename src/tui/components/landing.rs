//! # Landing Page Component
//!
//! Welcome placeholder drawn in place of the message list until the first
//! message is sent.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const WELCOME: &str = "Hi 👋 — ask me anything!";
const HINT: &str = "Enter to send · Esc to quit";

pub struct LandingPage;

impl LandingPage {
    fn lines() -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                WELCOME,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(HINT, Style::default().fg(Color::DarkGray))),
            Line::from(Span::styled(
                format!("Chatbox v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = Self::lines();
        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
    }
}
