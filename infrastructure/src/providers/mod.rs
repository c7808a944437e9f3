//! Model provider adapters implementing the `LlmGateway` port

pub mod anthropic;

pub use anthropic::{AnthropicConfig, AnthropicGateway};
