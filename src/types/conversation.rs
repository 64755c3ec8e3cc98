//! Append-only conversation history.

use serde::{Deserialize, Serialize};

use super::message::{Message, Role};

/// The ordered message history given to and extended by a model.
///
/// Mutation is append-only: messages are never reordered or deleted once
/// pushed. One conversation serves one session; webhook-style use builds a
/// fresh conversation per inbound event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a conversation seeded with a system message.
    pub fn with_system(text: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(text)],
        }
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages, in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recently appended message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Count messages with the given role.
    pub fn count_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_system_seeds_one_message() {
        let conv = Conversation::with_system("be helpful");
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].role, Role::System);
    }

    #[test]
    fn push_appends_in_order() {
        let mut conv = Conversation::new();
        conv.push(Message::user("one"));
        conv.push(Message::assistant("two"));

        assert_eq!(conv.len(), 2);
        assert_eq!(conv.last().unwrap().text(), "two");
        assert_eq!(conv.count_role(Role::User), 1);
    }
}
