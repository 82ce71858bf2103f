//! # Messages
//!
//! A `Message` is one row of the conversation: the text plus who said it.
//! Messages are immutable once built. The fields are private and only
//! readable through accessors, so nothing downstream can edit history.

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// Where a bot reply came from.
///
/// Both kinds render as ordinary bot messages, but fallback replies get a
/// subtle "offline" tag so the user can tell a canned answer from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOrigin {
    /// Text returned by the remote completion endpoint.
    Model,
    /// Locally generated reply after the remote call failed.
    Fallback,
}

/// The resolved answer to one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub origin: ReplyOrigin,
}

impl Reply {
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: ReplyOrigin::Model,
        }
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: ReplyOrigin::Fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    sender: Sender,
    /// Only set for bot messages.
    origin: Option<ReplyOrigin>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            origin: None,
        }
    }

    pub fn bot(reply: Reply) -> Self {
        Self {
            text: reply.text,
            sender: Sender::Bot,
            origin: Some(reply.origin),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn origin(&self) -> Option<ReplyOrigin> {
        self.origin
    }

    /// True for bot messages produced by the fallback path.
    pub fn is_fallback(&self) -> bool {
        self.origin == Some(ReplyOrigin::Fallback)
    }
}
