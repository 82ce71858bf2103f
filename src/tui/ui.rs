use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{LandingPage, MessageList, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

/// Draw one frame: title bar, then the conversation (or the welcome page
/// before the first message), then the input box.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let [title_area, main_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(frame.area());

    let has_unseen_content = app.has_started() && !tui.message_list.stick_to_bottom;
    TitleBar::new(&app.model_name, &app.status_message, has_unseen_content)
        .render(frame, title_area);

    if app.has_started() {
        MessageList::new(
            &mut tui.message_list,
            app.conversation.messages(),
            app.is_loading(),
            spinner_frame,
        )
        .render(frame, main_area);
    } else {
        LandingPage.render(frame, main_area);
    }

    tui.input_box.render(frame, input_area);
}
