//! # Actions
//!
//! Everything that can happen in Chatbox becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The resolver settles? That's `Action::ReplyResolved(reply)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` telling the caller what I/O to run.
//! No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: `assert_eq!(update(&mut app, action), expected)`.

use log::{debug, info, warn};

use crate::core::message::{Reply, ReplyOrigin};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The user submitted text from the input box.
    Submit(String),
    /// The background resolver finished with a reply.
    ReplyResolved(Reply),
    Quit,
}

/// What the caller must do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start resolving a reply for this (already trimmed) user text.
    SpawnRequest(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                debug!("Ignoring whitespace-only submit");
                return Effect::None;
            }
            if app.ui.is_loading {
                info!("Submit rejected: a reply is still in flight");
                app.status_message = String::from("Still thinking… wait for the reply");
                return Effect::None;
            }

            app.conversation.push_user(trimmed);
            app.ui.has_started = true;
            app.ui.is_loading = true;
            app.status_message = String::from("Thinking…");
            info!(
                "User message accepted ({} chars), conversation length {}",
                trimmed.len(),
                app.conversation.len()
            );
            Effect::SpawnRequest(trimmed.to_string())
        }
        Action::ReplyResolved(reply) => {
            if !app.ui.is_loading {
                warn!("Reply arrived while idle, ignoring");
                return Effect::None;
            }
            let origin = reply.origin;
            app.conversation.push_bot(reply);
            app.ui.is_loading = false;
            app.status_message = match origin {
                ReplyOrigin::Model => String::from("Ready"),
                ReplyOrigin::Fallback => String::from("Offline reply"),
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
