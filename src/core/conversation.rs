//! # Conversation
//!
//! Append-only, ordered list of messages. Insertion order is display order.
//!
//! Pairing rule: a bot message may only be appended directly after a user
//! message, so every user message has at most one reply following it.

use log::warn;

use crate::core::message::{Message, Reply, Sender};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.messages.push(Message::user(text));
        &self.messages[self.messages.len() - 1]
    }

    /// Appends a bot reply. Returns `None` (and appends nothing) when the
    /// last message is not an unanswered user message.
    pub fn push_bot(&mut self, reply: Reply) -> Option<&Message> {
        if !self.awaiting_reply() {
            warn!("Dropping bot reply with no pending user message");
            return None;
        }
        self.messages.push(Message::bot(reply));
        self.messages.last()
    }

    /// True when the newest message is from the user.
    pub fn awaiting_reply(&self) -> bool {
        self.messages
            .last()
            .is_some_and(|m| m.sender() == Sender::User)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_keep_insertion_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("one");
        conversation.push_bot(Reply::model("two"));
        conversation.push_user("three");

        let texts: Vec<&str> = conversation.messages().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn bot_reply_requires_pending_user_message() {
        let mut conversation = Conversation::new();
        assert!(conversation.push_bot(Reply::model("orphan")).is_none());
        assert!(conversation.is_empty());

        conversation.push_user("hi");
        assert!(conversation.push_bot(Reply::model("hello")).is_some());
        // Second reply to the same user message is refused
        assert!(conversation.push_bot(Reply::model("again")).is_none());
        assert_eq!(conversation.len(), 2);
    }

    #[test]
    fn awaiting_reply_tracks_last_sender() {
        let mut conversation = Conversation::new();
        assert!(!conversation.awaiting_reply());
        conversation.push_user("ping");
        assert!(conversation.awaiting_reply());
        conversation.push_bot(Reply::fallback("pong"));
        assert!(!conversation.awaiting_reply());
    }
}
