//! Which persona the tie-break Judge plays

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Persona source for the Judge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgePersona {
    /// Reuse `moderator_meta_prompt` (default)
    #[default]
    Moderator,
    /// Use the prompt set's `judge_meta_prompt`
    Dedicated,
}

impl JudgePersona {
    pub fn as_str(&self) -> &'static str {
        match self {
            JudgePersona::Moderator => "moderator",
            JudgePersona::Dedicated => "dedicated",
        }
    }
}

impl std::fmt::Display for JudgePersona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JudgePersona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "moderator" => Ok(JudgePersona::Moderator),
            "dedicated" | "judge" => Ok(JudgePersona::Dedicated),
            other => Err(format!(
                "unknown judge persona '{}' (expected moderator or dedicated)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("moderator".parse(), Ok(JudgePersona::Moderator));
        assert_eq!("Dedicated".parse(), Ok(JudgePersona::Dedicated));
        assert_eq!("judge".parse(), Ok(JudgePersona::Dedicated));
        assert!("nobody".parse::<JudgePersona>().is_err());
    }

    #[test]
    fn test_deserialize_lowercase() {
        let persona: JudgePersona = serde_json::from_str("\"dedicated\"").unwrap();
        assert_eq!(persona, JudgePersona::Dedicated);
    }
}
