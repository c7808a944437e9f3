//! Conversation memory domain
//!
//! The per-agent, append-only message log that every model call consumes.

pub mod entities;

pub use entities::{Conversation, Message, Role};
