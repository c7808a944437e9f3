//! Presentation layer for multi-agent-debate
//!
//! This crate contains the CLI definition, output formatters,
//! progress reporters, and the interactive debate prompt.

pub mod cli;
pub mod output;
pub mod progress;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::{BatchArgs, Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{
    BatchProgressReporter, ProgressMode, ProgressReporter, SimpleProgress,
};
pub use repl::DebateRepl;
