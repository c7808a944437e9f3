//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod judge_persona;
mod output_format;

pub use judge_persona::JudgePersona;
pub use output_format::OutputFormat;
