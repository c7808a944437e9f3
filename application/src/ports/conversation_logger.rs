//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording debate events
//! (agent turns, Moderator and Judge decisions, outcomes) to a structured
//! log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! debate transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured debate event for logging.
///
/// Each event has a type string, an optional debate instance id and a
/// JSON payload with event-specific fields. The adapter adds the
/// timestamp when writing.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    pub event_type: &'static str,
    /// Instance id, so interleaved batch events can be told apart
    pub instance: Option<String>,
    pub payload: Value,
}

impl ConversationEvent {
    pub const DEBATE_STARTED: &'static str = "debate_started";
    pub const AGENT_TURN: &'static str = "agent_turn";
    pub const MODERATOR_DECISION: &'static str = "moderator_decision";
    pub const JUDGE_DECISION: &'static str = "judge_decision";
    pub const DEBATE_FINISHED: &'static str = "debate_finished";

    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            instance: None,
            payload,
        }
    }

    pub fn for_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }
}

/// Port for logging debate events to a structured log.
///
/// `log` is synchronous and infallible so that a broken log file never
/// aborts a debate; adapters swallow their own write errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
