//! Debate player: one agent with its own conversation memory.

use crate::config::DebateSettings;
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use debate_domain::{AgentRole, Conversation, DomainError, Message, Role};

/// An agent taking part in one debate instance.
///
/// Asking and committing are separate steps: [`next_reply`](Self::next_reply)
/// only reads the conversation, [`record_reply`](Self::record_reply)
/// appends to it. The player never retries a failed call.
#[derive(Debug, Clone)]
pub struct DebatePlayer {
    role: AgentRole,
    conversation: Conversation,
}

impl DebatePlayer {
    pub fn new(role: AgentRole) -> Self {
        Self {
            role,
            conversation: Conversation::new(),
        }
    }

    pub fn with_persona(role: AgentRole, persona: &str) -> Result<Self, DomainError> {
        let mut player = Self::new(role);
        player.set_persona(persona)?;
        Ok(player)
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn into_conversation(self) -> Conversation {
        self.conversation
    }

    /// Rejected once the player has taken a turn
    pub fn set_persona(&mut self, persona: &str) -> Result<(), DomainError> {
        self.conversation
            .set_persona(self.role.display_name(), persona)
    }

    pub fn append_event(&mut self, role: Role, content: impl Into<String>) -> Result<(), DomainError> {
        self.conversation.append(Message {
            role,
            content: content.into(),
        })
    }

    /// Append a prompt addressed to this player
    pub fn add_event(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        self.append_event(Role::User, content)
    }

    /// Ask the model for this player's next reply without recording it
    pub async fn next_reply<G>(
        &self,
        gateway: &G,
        settings: &DebateSettings,
    ) -> Result<String, GatewayError>
    where
        G: LlmGateway + ?Sized,
    {
        gateway
            .ask(CompletionRequest {
                model: &settings.model,
                temperature: settings.temperature,
                persona: self.conversation.persona(),
                history: self.conversation.history(),
            })
            .await
    }

    pub fn record_reply(&mut self, reply: impl Into<String>) -> Result<(), DomainError> {
        self.append_event(Role::Assistant, reply)
    }
}
