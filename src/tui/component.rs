use ratatui::Frame;
use ratatui::layout::Rect;

/// Something that can draw itself into a rectangle of the frame.
///
/// Props live in struct fields. `render` takes `&mut self` so stateful
/// components (the message list, the input box) can update caches and
/// scroll offsets during the draw pass, the way ratatui's `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns low-level terminal events into its own events.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Returns `Some` when the terminal event produced something the parent cares about.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
