//! The prompt set driving one debate

use crate::core::error::DomainError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Template keys every prompt set must provide
pub const REQUIRED_KEYS: [&str; 8] = [
    "player_meta_prompt",
    "moderator_meta_prompt",
    "affirmative_prompt",
    "negative_prompt",
    "moderator_prompt",
    "debate_prompt",
    "judge_prompt_last1",
    "judge_prompt_last2",
];

/// Validated, immutable prompt templates.
///
/// Built once per run and shared read-only by every debate instance;
/// the engine renders new strings per turn and never edits these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebatePrompts {
    pub player_meta_prompt: String,
    pub moderator_meta_prompt: String,
    pub affirmative_prompt: String,
    pub negative_prompt: String,
    pub moderator_prompt: String,
    pub debate_prompt: String,
    pub judge_prompt_last1: String,
    pub judge_prompt_last2: String,
    /// Asks the Baseline agent for a first answer (translation mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_prompt: Option<String>,
    /// Dedicated Judge persona; the Moderator persona is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_meta_prompt: Option<String>,
}

impl DebatePrompts {
    /// Build from a JSON object (the prompt file's top level).
    ///
    /// Unrelated keys are ignored. A missing or non-string required key
    /// is a configuration error.
    pub fn from_json_object(object: &Map<String, Value>) -> Result<Self, DomainError> {
        let required = |key: &str| -> Result<String, DomainError> {
            match object.get(key) {
                Some(Value::String(s)) => Ok(s.clone()),
                Some(_) => Err(DomainError::InvalidTemplate(key.to_string())),
                None => Err(DomainError::MissingTemplate(key.to_string())),
            }
        };
        let optional = |key: &str| -> Result<Option<String>, DomainError> {
            match object.get(key) {
                Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.clone())),
                Some(Value::String(_)) | Some(Value::Null) | None => Ok(None),
                Some(_) => Err(DomainError::InvalidTemplate(key.to_string())),
            }
        };

        Ok(Self {
            player_meta_prompt: required("player_meta_prompt")?,
            moderator_meta_prompt: required("moderator_meta_prompt")?,
            affirmative_prompt: required("affirmative_prompt")?,
            negative_prompt: required("negative_prompt")?,
            moderator_prompt: required("moderator_prompt")?,
            debate_prompt: required("debate_prompt")?,
            judge_prompt_last1: required("judge_prompt_last1")?,
            judge_prompt_last2: required("judge_prompt_last2")?,
            base_prompt: optional("base_prompt")?,
            judge_meta_prompt: optional("judge_meta_prompt")?,
        })
    }

    /// Fail unless a Baseline prompt is available
    pub fn require_base_prompt(&self) -> Result<&str, DomainError> {
        self.base_prompt
            .as_deref()
            .ok_or_else(|| DomainError::MissingTemplate("base_prompt".to_string()))
    }

    /// Fail unless a dedicated Judge persona is available
    pub fn require_judge_meta_prompt(&self) -> Result<&str, DomainError> {
        self.judge_meta_prompt
            .as_deref()
            .ok_or_else(|| DomainError::MissingTemplate("judge_meta_prompt".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_object() -> Map<String, Value> {
        json!({
            "player_meta_prompt": "You are a debater. Topic: ##debate_topic##",
            "moderator_meta_prompt": "You are the moderator of ##debate_topic##",
            "affirmative_prompt": "##debate_topic##",
            "negative_prompt": "##aff_ans##\n\nYou disagree with my answer. Provide your answer and reasons.",
            "moderator_prompt": "Now the ##round## round of debate ends.\nAffirmative: ##aff_ans##\nNegative: ##neg_ans##",
            "debate_prompt": "##oppo_ans##\n\nDo you agree with my perspective?",
            "judge_prompt_last1": "Affirmative: ##aff_ans##\nNegative: ##neg_ans##\nWhat candidate answers are there?",
            "judge_prompt_last2": "Give the final answer to ##debate_topic## as JSON.",
            "debate_topic": ""
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_from_json_object() {
        let prompts = DebatePrompts::from_json_object(&sample_object()).unwrap();
        assert!(prompts.debate_prompt.contains("##oppo_ans##"));
        assert!(prompts.base_prompt.is_none());
        assert!(prompts.judge_meta_prompt.is_none());
    }

    #[test]
    fn test_each_required_key_is_enforced() {
        for key in REQUIRED_KEYS {
            let mut object = sample_object();
            object.remove(key);
            assert_eq!(
                DebatePrompts::from_json_object(&object).unwrap_err(),
                DomainError::MissingTemplate(key.to_string())
            );
        }
    }

    #[test]
    fn test_non_string_template_rejected() {
        let mut object = sample_object();
        object.insert("debate_prompt".to_string(), json!(["not", "a", "string"]));
        assert_eq!(
            DebatePrompts::from_json_object(&object).unwrap_err(),
            DomainError::InvalidTemplate("debate_prompt".to_string())
        );
    }

    #[test]
    fn test_blank_optional_is_absent() {
        let mut object = sample_object();
        object.insert("base_prompt".to_string(), json!("   "));
        let prompts = DebatePrompts::from_json_object(&object).unwrap();
        assert!(prompts.require_base_prompt().is_err());
    }
}
