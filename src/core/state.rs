//! # Application State
//!
//! Core business state for Chatbox. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── conversation: Conversation   // ordered user/bot messages
//! ├── ui: SessionUiState           // is_loading + has_started
//! ├── status_message: String       // status bar text
//! └── model_name: String           // model sent with every request
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::conversation::Conversation;

/// Session flags that drive the loading indicator and the welcome screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionUiState {
    /// True between an accepted submit and the reply settling.
    pub is_loading: bool,
    /// Flips to true on the first accepted submit and never reverts.
    pub has_started: bool,
}

pub struct App {
    pub conversation: Conversation,
    pub ui: SessionUiState,
    pub status_message: String,
    pub model_name: String,
}

impl App {
    pub fn new(model_name: String) -> Self {
        Self {
            conversation: Conversation::new(),
            ui: SessionUiState::default(),
            status_message: String::from("Welcome to Chatbox!"),
            model_name,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.ui.is_loading
    }

    pub fn has_started(&self) -> bool {
        self.ui.has_started
    }
}
