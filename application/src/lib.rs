//! Application layer for multi-agent-debate
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BatchSettings, DebateSettings};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{ClientErrorKind, CompletionRequest, GatewayError, LlmGateway},
    progress::{BatchProgressNotifier, DebateProgressNotifier, NoBatchProgress, NoProgress},
    record_store::{RecordStore, RecordStoreError},
};
pub use use_cases::run_batch::{
    BatchItem, BatchSummary, InstanceStatus, RunBatchUseCase,
};
pub use use_cases::run_debate::{
    DebatePlayer, RunDebateError, RunDebateInput, RunDebateUseCase,
};
