//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`DebateSettings`]: model, temperature, round budget, Judge persona
//! - [`BatchSettings`]: corpus concurrency and resume behaviour

pub mod batch_settings;
pub mod debate_settings;

pub use batch_settings::BatchSettings;
pub use debate_settings::DebateSettings;
