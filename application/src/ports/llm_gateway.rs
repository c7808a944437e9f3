//! LLM Gateway port
//!
//! Defines the Model Client capability the debate engine consumes:
//! given a persona and an ordered message history, return free text.

use async_trait::async_trait;
use debate_domain::{Message, Model};
use thiserror::Error;

/// Coarse classification of a [`GatewayError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    RateLimited,
    Timeout,
    Malformed,
    Unknown,
}

impl ClientErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientErrorKind::RateLimited => "rate_limited",
            ClientErrorKind::Timeout => "timeout",
            ClientErrorKind::Malformed => "malformed",
            ClientErrorKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ClientErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur during LLM gateway operations
///
/// The engine never retries on these; retry policy belongs to the adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Timeout")]
    Timeout,

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    pub fn kind(&self) -> ClientErrorKind {
        match self {
            GatewayError::RateLimited(_) => ClientErrorKind::RateLimited,
            GatewayError::Timeout => ClientErrorKind::Timeout,
            GatewayError::Malformed(_) => ClientErrorKind::Malformed,
            GatewayError::ConnectionError(_)
            | GatewayError::AuthError(_)
            | GatewayError::RequestFailed(_)
            | GatewayError::Other(_) => ClientErrorKind::Unknown,
        }
    }
}

/// One model call: the persona plus everything said so far
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub model: &'a Model,
    pub temperature: f32,
    /// System prompt; `None` for agents without a persona
    pub persona: Option<&'a str>,
    /// User/assistant messages in order, persona excluded
    pub history: &'a [Message],
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer and must
/// support concurrent calls.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the conversation and return the model's reply text
    async fn ask(&self, request: CompletionRequest<'_>) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            GatewayError::RateLimited("429".into()).kind(),
            ClientErrorKind::RateLimited
        );
        assert_eq!(GatewayError::Timeout.kind(), ClientErrorKind::Timeout);
        assert_eq!(
            GatewayError::Malformed("no text".into()).kind(),
            ClientErrorKind::Malformed
        );
        assert_eq!(
            GatewayError::AuthError("401".into()).kind(),
            ClientErrorKind::Unknown
        );
    }
}
