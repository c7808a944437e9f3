//! Debate domain
//!
//! One debate instance pits an Affirmative side against a Negative side
//! while a Moderator judges each round. When the round budget runs out
//! without a decision, a Judge picks the final answer.
//!
//! - [`state`]: the round state machine
//! - [`decision`] and [`parsing`]: structured verdicts recovered from replies
//! - [`seed`]: what an instance is about (translation or open topic)
//! - [`record`]: the persisted result

pub mod decision;
pub mod parsing;
pub mod record;
pub mod role;
pub mod seed;
pub mod state;

pub use decision::{DecisionObject, SupportedSide};
pub use parsing::normalize_decision;
pub use record::{DebateRecord, RecordMeta};
pub use role::AgentRole;
pub use seed::{BaselineSource, DebateMode, DebateSeed, TopicSeed, TranslationSeed};
pub use state::{DebatePhase, DebateState, Outcome, round_label};
