//! Debate settings: the immutable per-run engine configuration.
//!
//! Built once from the merged file/CLI configuration and handed to
//! [`RunDebateUseCase`](crate::use_cases::run_debate::RunDebateUseCase) at
//! construction. The engine only ever reads it.

use debate_domain::{DomainError, JudgePersona, Model};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateSettings {
    /// Model playing every role
    pub model: Model,
    pub temperature: f32,
    /// Total Moderator judgments, opening round included
    pub max_round: usize,
    pub judge_persona: JudgePersona,
}

impl Default for DebateSettings {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: 0.0,
            max_round: 3,
            judge_persona: JudgePersona::default(),
        }
    }
}

impl DebateSettings {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_round(mut self, max_round: usize) -> Self {
        self.max_round = max_round;
        self
    }

    pub fn with_judge_persona(mut self, judge_persona: JudgePersona) -> Self {
        self.judge_persona = judge_persona;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_round == 0 {
            return Err(DomainError::InvalidRoundLimit(self.max_round));
        }
        Ok(())
    }
}
