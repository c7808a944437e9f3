//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Models that can play a debate role (Value Object)
///
/// All debate agents of one instance share the same model; the value is
/// carried into the produced record as `model_name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    ClaudeSonnet45,
    ClaudeSonnet35,
    ClaudeOpus3,
    ClaudeSonnet3,
    ClaudeHaiku3,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the provider identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::ClaudeSonnet45 => "claude-sonnet-4-5-20250929",
            Model::ClaudeSonnet35 => "claude-3-5-sonnet-20241022",
            Model::ClaudeOpus3 => "claude-3-opus-20240229",
            Model::ClaudeSonnet3 => "claude-3-sonnet-20240229",
            Model::ClaudeHaiku3 => "claude-3-haiku-20240307",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default model (Claude 3 Haiku, the fastest)
    fn default() -> Self {
        Model::ClaudeHaiku3
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "claude-sonnet-4-5-20250929" => Model::ClaudeSonnet45,
            "claude-3-5-sonnet-20241022" => Model::ClaudeSonnet35,
            "claude-3-opus-20240229" => Model::ClaudeOpus3,
            "claude-3-sonnet-20240229" => Model::ClaudeSonnet3,
            "claude-3-haiku-20240307" => Model::ClaudeHaiku3,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_else(|never: std::convert::Infallible| match never {}))
    }
}
