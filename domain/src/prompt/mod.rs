//! Prompt domain
//!
//! The debate's prompt set and the `##name##` substitution it relies on.

mod prompts;
mod template;

pub use prompts::{DebatePrompts, REQUIRED_KEYS};
pub use template::{PromptTemplate, TemplateVars};
