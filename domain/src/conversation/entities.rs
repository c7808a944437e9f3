//! Conversation domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message in a conversation (Entity)
///
/// Immutable once appended to a [`Conversation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered message log owned by exactly one agent.
///
/// Invariants:
/// - index 0 holds the persona (system message) when one is set
/// - the persona can only be set or replaced while no other message exists
/// - messages are only ever appended; never removed or reordered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) the persona at position 0.
    ///
    /// Rejected with [`DomainError::PersonaAfterTurns`] once any user or
    /// assistant message has been appended.
    pub fn set_persona(&mut self, owner: &str, persona: impl Into<String>) -> Result<(), DomainError> {
        let turns = self.turn_count();
        if turns > 0 {
            return Err(DomainError::PersonaAfterTurns(owner.to_string(), turns));
        }
        let message = Message::system(persona);
        match self.messages.first_mut() {
            Some(first) => *first = message,
            None => self.messages.push(message),
        }
        Ok(())
    }

    /// Append a user or assistant message.
    pub fn append(&mut self, message: Message) -> Result<(), DomainError> {
        if message.role == Role::System {
            return Err(DomainError::SystemMessageMidConversation);
        }
        self.messages.push(message);
        Ok(())
    }

    /// The persona text, if one was set
    pub fn persona(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
    }

    /// All messages after the persona
    pub fn history(&self) -> &[Message] {
        if self.persona().is_some() {
            &self.messages[1..]
        } else {
            &self.messages
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of non-persona messages
    pub fn turn_count(&self) -> usize {
        self.history().len()
    }

    /// The n-th assistant reply (0-based)
    pub fn reply(&self, n: usize) -> Option<&str> {
        self.messages
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .nth(n)
            .map(|m| m.content.as_str())
    }

    /// The first substantive statement this agent made
    pub fn first_reply(&self) -> Option<&str> {
        self.reply(0)
    }

    pub fn last_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_is_first_message() {
        let mut conversation = Conversation::new();
        conversation.set_persona("Moderator", "You are a moderator.").unwrap();
        conversation.append(Message::user("Round one")).unwrap();

        assert_eq!(conversation.persona(), Some("You are a moderator."));
        assert_eq!(conversation.messages()[0].role, Role::System);
        assert_eq!(conversation.history().len(), 1);
    }

    #[test]
    fn test_persona_can_be_overwritten_before_turns() {
        let mut conversation = Conversation::new();
        conversation.set_persona("Judge", "first").unwrap();
        conversation.set_persona("Judge", "second").unwrap();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.persona(), Some("second"));
    }

    #[test]
    fn test_persona_rejected_after_turns() {
        let mut conversation = Conversation::new();
        conversation.append(Message::user("hello")).unwrap();
        let err = conversation.set_persona("Affirmative side", "late").unwrap_err();
        assert_eq!(
            err,
            DomainError::PersonaAfterTurns("Affirmative side".to_string(), 1)
        );
        assert_eq!(conversation.persona(), None);
    }

    #[test]
    fn test_system_message_cannot_be_appended() {
        let mut conversation = Conversation::new();
        let err = conversation.append(Message::system("sneaky")).unwrap_err();
        assert_eq!(err, DomainError::SystemMessageMidConversation);
        assert!(conversation.is_empty());
    }

    #[test]
    fn test_length_grows_one_per_turn() {
        let mut conversation = Conversation::new();
        conversation.set_persona("Negative side", "persona").unwrap();
        for k in 1..=4 {
            let message = if k % 2 == 1 {
                Message::user(format!("event {k}"))
            } else {
                Message::assistant(format!("reply {k}"))
            };
            conversation.append(message).unwrap();
            assert_eq!(conversation.len(), 1 + k);
            assert_eq!(conversation.turn_count(), k);
        }
    }

    #[test]
    fn test_reply_lookup() {
        let mut conversation = Conversation::new();
        conversation.set_persona("Affirmative side", "persona").unwrap();
        conversation.append(Message::user("opening")).unwrap();
        conversation.append(Message::assistant("first answer")).unwrap();
        conversation.append(Message::user("rebut")).unwrap();
        conversation.append(Message::assistant("second answer")).unwrap();

        assert_eq!(conversation.first_reply(), Some("first answer"));
        assert_eq!(conversation.messages()[2].content, "first answer");
        assert_eq!(conversation.reply(1), Some("second answer"));
        assert_eq!(conversation.last_reply(), Some("second answer"));
        assert_eq!(conversation.reply(2), None);
    }

    #[test]
    fn test_serializes_as_plain_message_list() {
        let mut conversation = Conversation::new();
        conversation.set_persona("Moderator", "persona").unwrap();
        conversation.append(Message::user("hi")).unwrap();
        let json = serde_json::to_value(&conversation).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"role": "system", "content": "persona"},
                {"role": "user", "content": "hi"}
            ])
        );
    }
}
