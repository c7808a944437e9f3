//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application settings
//! after validation.

mod batch;
mod debate;
mod output;
mod provider;

pub use batch::FileBatchConfig;
pub use debate::FileDebateConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use provider::FileProviderConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("temperature must be between 0.0 and 1.0 (got {0})")]
    InvalidTemperature(f32),

    #[error("max_round must be at least 1")]
    InvalidRoundLimit,

    #[error("batch concurrency must be at least 1")]
    InvalidConcurrency,

    #[error("max_concurrent_requests must be at least 1")]
    InvalidRequestLimit,

    #[error("unknown judge_persona '{0}' (expected \"moderator\" or \"dedicated\")")]
    UnknownJudgePersona(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model, temperature and round budget
    pub debate: FileDebateConfig,
    /// Anthropic API access, retry and rate limits
    pub provider: FileProviderConfig,
    /// Corpus driver settings
    pub batch: FileBatchConfig,
    /// Console and transcript output
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, stopping at the first problem
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.debate.validate()?;
        if self.provider.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.provider.max_concurrent_requests == 0 {
            return Err(ConfigValidationError::InvalidRequestLimit);
        }
        if self.batch.concurrency == 0 {
            return Err(ConfigValidationError::InvalidConcurrency);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{JudgePersona, Model};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[debate]
model = "claude-3-5-sonnet-20241022"
temperature = 0.7
max_round = 5
judge_persona = "dedicated"
prompts = "prompts/translation.json"

[provider]
api_key_env = "MY_KEY"
sleep_time = 1.5
max_retries = 2

[batch]
concurrency = 8
skip_existing = false

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_ok());

        let settings = config.debate.to_settings().unwrap();
        assert_eq!(settings.model, Model::ClaudeSonnet35);
        assert_eq!(settings.max_round, 5);
        assert_eq!(settings.judge_persona, JudgePersona::Dedicated);
        assert_eq!(config.provider.api_key_env, "MY_KEY");
        assert_eq!(config.provider.sleep_time, 1.5);
        assert_eq!(config.batch.to_settings().concurrency, 8);
        assert!(!config.batch.skip_existing);
        assert!(!config.output.color);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[debate]
max_round = 2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.debate.max_round, 2);
        // Defaults should apply
        assert_eq!(config.debate.model, Model::default().to_string());
        assert_eq!(config.provider.max_retries, 5);
        assert!(config.batch.skip_existing);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.debate.temperature = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTemperature(1.5))
        );

        let mut config = FileConfig::default();
        config.debate.max_round = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidRoundLimit));

        let mut config = FileConfig::default();
        config.debate.model = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));

        let mut config = FileConfig::default();
        config.provider.timeout_seconds = Some(0);
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.batch.concurrency = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidConcurrency));

        let mut config = FileConfig::default();
        config.debate.judge_persona = "oracle".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnknownJudgePersona(p)) if p == "oracle"
        ));
    }

    #[test]
    fn test_resolve_api_key_prefers_direct_value() {
        let provider = FileProviderConfig {
            api_key: Some("sk-direct".to_string()),
            api_key_env: "MAD_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..Default::default()
        };
        assert_eq!(provider.resolve_api_key().as_deref(), Some("sk-direct"));

        let provider = FileProviderConfig {
            api_key: None,
            api_key_env: "MAD_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..Default::default()
        };
        assert_eq!(provider.resolve_api_key(), None);
    }
}
