//! Type definitions for the RunDebate use case.

use crate::ports::llm_gateway::{ClientErrorKind, GatewayError};
use debate_domain::{DebateSeed, DomainError};
use thiserror::Error;

/// Errors that can abort a debate instance
///
/// Unparseable Moderator or Judge replies are not errors; they become
/// undecided decisions. Running out of rounds is not an error either.
#[derive(Error, Debug)]
pub enum RunDebateError {
    /// Raised before any model call is made
    #[error("Invalid configuration: {0}")]
    Config(DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Domain error: {0}")]
    Domain(DomainError),
}

impl From<DomainError> for RunDebateError {
    fn from(error: DomainError) -> Self {
        if error.is_config_error() {
            RunDebateError::Config(error)
        } else {
            RunDebateError::Domain(error)
        }
    }
}

impl RunDebateError {
    pub fn is_config_error(&self) -> bool {
        matches!(self, RunDebateError::Config(_))
    }

    /// The Model Client error kind, when a model call failed
    pub fn client_kind(&self) -> Option<ClientErrorKind> {
        match self {
            RunDebateError::Gateway(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// Input for the RunDebate use case
#[derive(Debug)]
pub struct RunDebateInput {
    /// Identifies the instance in logs and events
    pub instance_id: String,
    pub seed: Box<dyn DebateSeed>,
}

impl RunDebateInput {
    pub fn new(instance_id: impl Into<String>, seed: impl DebateSeed + 'static) -> Self {
        Self {
            instance_id: instance_id.into(),
            seed: Box::new(seed),
        }
    }
}
