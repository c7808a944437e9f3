//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Everything here is detected before or between model calls and is
/// never produced by the model itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Persona must be set before the first turn ({0} already has {1} messages)")]
    PersonaAfterTurns(String, usize),

    #[error("System messages can only be set as the persona")]
    SystemMessageMidConversation,

    #[error("Missing required prompt template: {0}")]
    MissingTemplate(String),

    #[error("Prompt template {0} must be a string")]
    InvalidTemplate(String),

    #[error("max_round must be at least 1 (got {0})")]
    InvalidRoundLimit(usize),

    #[error("Invalid debate seed: {0}")]
    InvalidSeed(String),
}

impl DomainError {
    /// Check if this error stems from configuration rather than from
    /// misuse of a conversation
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DomainError::MissingTemplate(_)
                | DomainError::InvalidTemplate(_)
                | DomainError::InvalidRoundLimit(_)
                | DomainError::InvalidSeed(_)
        )
    }
}
