//! Prompt-set loading from on-disk JSON

mod loader;

pub use loader::{PromptLoadError, load_prompts};
