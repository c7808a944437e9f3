//! Debate configuration from TOML (`[debate]` section)

use debate_application::DebateSettings;
use debate_domain::{JudgePersona, Model};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ConfigValidationError;

/// Raw debate configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Model playing every role
    pub model: String,
    /// Sampling temperature (0.0 - 1.0)
    pub temperature: f32,
    /// Total Moderator judgments, opening round included
    pub max_round: usize,
    /// "moderator" (reuse the Moderator persona) or "dedicated"
    pub judge_persona: String,
    /// Prompt set JSON file
    pub prompts: Option<PathBuf>,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            model: Model::default().to_string(),
            temperature: 0.0,
            max_round: 3,
            judge_persona: JudgePersona::default().to_string(),
            prompts: None,
        }
    }
}

impl FileDebateConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(self.temperature));
        }
        if self.max_round == 0 {
            return Err(ConfigValidationError::InvalidRoundLimit);
        }
        self.parse_judge_persona()?;
        Ok(())
    }

    pub fn parse_judge_persona(&self) -> Result<JudgePersona, ConfigValidationError> {
        self.judge_persona
            .parse()
            .map_err(|_| ConfigValidationError::UnknownJudgePersona(self.judge_persona.clone()))
    }

    pub fn to_settings(&self) -> Result<DebateSettings, ConfigValidationError> {
        self.validate()?;
        Ok(DebateSettings {
            model: self.model.trim().parse().unwrap_or_default(),
            temperature: self.temperature,
            max_round: self.max_round,
            judge_persona: self.parse_judge_persona()?,
        })
    }
}
