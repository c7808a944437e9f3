//! Interactive debate module
//!
//! Provides a readline-based prompt that runs one topic debate per line.

mod session;

pub use session::DebateRepl;
