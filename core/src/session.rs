//! Session Management
//!
//! A session is one continuous chat with a single persona. It owns the
//! ordered message list: insertion order is chronological order, and
//! messages are only ever appended. Nothing here is persisted; the session
//! is dropped when the user leaves the chat view.

use serde::{Deserialize, Serialize};

use crate::messages::{MessageId, Sender, SessionId};
use crate::persona::PersonaId;

/// A message in the conversation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message ID
    pub id: MessageId,
    /// Who sent this message
    pub sender: Sender,
    /// Message content
    pub text: String,
    /// Local wall-clock time of creation, formatted `HH:MM`
    pub timestamp: String,
}

impl ChatMessage {
    /// Create a new message stamped with the current time
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            text: text.into(),
            timestamp: display_time(),
        }
    }
}

/// A conversation session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Unique session ID
    pub id: SessionId,
    /// Persona this session talks to
    pub persona: PersonaId,
    /// Conversation history
    messages: Vec<ChatMessage>,
}

impl Session {
    /// Create an empty session for a persona
    #[must_use]
    pub fn new(persona: PersonaId) -> Self {
        Self {
            id: SessionId::new(),
            persona,
            messages: Vec::new(),
        }
    }

    /// Add a user message
    pub fn add_user_message(&mut self, text: impl Into<String>) -> MessageId {
        self.push(ChatMessage::new(Sender::User, text))
    }

    /// Add a persona message
    pub fn add_persona_message(&mut self, text: impl Into<String>) -> MessageId {
        self.push(ChatMessage::new(Sender::Persona, text))
    }

    fn push(&mut self, msg: ChatMessage) -> MessageId {
        let id = msg.id;
        self.messages.push(msg);
        id
    }

    /// All messages, oldest first
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the session holds no messages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Two-digit hour and minute in local time
fn display_time() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_session_creation() {
        let session = Session::new("luna".into());
        assert!(session.is_empty());
        assert_eq!(session.persona, PersonaId::from("luna"));
    }

    #[test]
    fn test_messages_keep_insertion_order() {
        let mut session = Session::new("luna".into());

        let greeting = session.add_persona_message("Hi!");
        let question = session.add_user_message("Hello");
        let answer = session.add_persona_message("Let me think...");

        let ids: Vec<_> = session.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![greeting, question, answer]);
        assert!(greeting < question && question < answer);
        assert_eq!(session.len(), 3);

        let senders: Vec<_> = session.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::Persona, Sender::User, Sender::Persona]);
        assert_eq!(session.messages()[2].text, "Let me think...");
    }

    #[test]
    fn test_timestamp_format() {
        let msg = ChatMessage::new(Sender::Persona, "hi");
        assert_eq!(msg.timestamp.len(), 5);
        assert_eq!(msg.timestamp.as_bytes()[2], b':');
    }
}
