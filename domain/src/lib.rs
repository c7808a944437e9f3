//! Domain layer for multi-agent-debate
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Two debaters argue opposing sides of a question over several rounds:
//!
//! - **Affirmative / Negative**: open with a position, then rebut each other
//! - **Moderator**: judges every round and ends the debate once convinced
//! - **Judge**: breaks the tie when the round budget runs out
//!
//! ## Conversation
//!
//! Every agent owns its own ordered message log. Agents never see each
//! other's logs; the engine relays statements by rendering them into
//! prompt templates.

pub mod config;
pub mod conversation;
pub mod core;
pub mod debate;
pub mod prompt;

// Re-export commonly used types
pub use config::{JudgePersona, OutputFormat};
pub use conversation::{Conversation, Message, Role};
pub use core::{error::DomainError, model::Model};
pub use debate::{
    AgentRole, BaselineSource, DebateMode, DebatePhase, DebateRecord, DebateSeed, DebateState,
    DecisionObject, Outcome, RecordMeta, SupportedSide, TopicSeed, TranslationSeed,
    normalize_decision, round_label,
};
pub use prompt::{DebatePrompts, PromptTemplate, REQUIRED_KEYS, TemplateVars};
