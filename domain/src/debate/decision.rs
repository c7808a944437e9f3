//! Decision object extracted from Moderator and Judge replies

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

const ANSWER_KEYS: [&str; 3] = ["final_answer", "debate_answer", "debate_translation"];
const RATIONALE_KEYS: [&str; 3] = ["rationale", "Reason", "reason"];
const SIDE_KEYS: [&str; 3] = ["supported_side", "Supported Side", "supported side"];

/// The side a Moderator or Judge sided with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupportedSide {
    Affirmative,
    Negative,
    #[default]
    None,
}

impl SupportedSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedSide::Affirmative => "Affirmative",
            SupportedSide::Negative => "Negative",
            SupportedSide::None => "",
        }
    }

    /// Lenient parse: "Affirmative", "affirmative side", "NEGATIVE" ...
    pub fn parse_lenient(s: &str) -> Self {
        let lower = s.trim().to_lowercase();
        if lower.starts_with("affirmative") {
            SupportedSide::Affirmative
        } else if lower.starts_with("negative") {
            SupportedSide::Negative
        } else {
            SupportedSide::None
        }
    }
}

impl std::fmt::Display for SupportedSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for SupportedSide {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SupportedSide {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.map(|s| SupportedSide::parse_lenient(&s)).unwrap_or_default())
    }
}

/// Structured result of a Moderator or Judge turn.
///
/// An empty `final_answer` means "not yet decided, keep debating".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecisionObject {
    #[serde(default)]
    pub final_answer: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub supported_side: SupportedSide,
}

impl DecisionObject {
    pub fn new(
        final_answer: impl Into<String>,
        rationale: impl Into<String>,
        supported_side: SupportedSide,
    ) -> Self {
        Self {
            final_answer: final_answer.into(),
            rationale: rationale.into(),
            supported_side,
        }
    }

    /// The "continue debating" decision
    pub fn undecided(rationale: impl Into<String>) -> Self {
        Self::new("", rationale, SupportedSide::None)
    }

    pub fn is_decided(&self) -> bool {
        !self.final_answer.trim().is_empty()
    }

    /// Build a decision from a parsed JSON object, accepting every key
    /// spelling the prompt sets have used over time.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let answer = lookup(object, &ANSWER_KEYS);
        let rationale = lookup(object, &RATIONALE_KEYS);
        let side = lookup(object, &SIDE_KEYS);
        Self::new(answer, rationale, SupportedSide::parse_lenient(&side))
    }
}

fn lookup(object: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| object.get(*key))
        .map(value_text)
        .unwrap_or_default()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
