//! Infrastructure layer for multi-agent-debate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Anthropic model gateway, configuration
//! file loading, prompt and corpus readers, record storage and the
//! JSONL debate transcript.

pub mod config;
pub mod corpus;
pub mod logging;
pub mod prompts;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBatchConfig, FileConfig, FileDebateConfig,
    FileOutputConfig, FileOutputFormat, FileProviderConfig,
};
pub use corpus::{CorpusError, LangPair, read_topic_corpus, read_translation_corpus};
pub use logging::JsonlConversationLogger;
pub use prompts::{PromptLoadError, load_prompts};
pub use providers::{AnthropicConfig, AnthropicGateway};
pub use storage::JsonRecordStore;
