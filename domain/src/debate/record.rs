//! The durable per-instance debate record
//!
//! Downstream scoring scripts key off `success`, the mode's answer field
//! (`debate_translation` / `debate_answer`) and `reference`, so the key
//! names here are a stable schema.

use super::decision::DecisionObject;
use super::role::AgentRole;
use super::seed::DebateSeed;
use super::state::Outcome;
use crate::conversation::{Conversation, Message};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Record keys holding the final answer, by mode
const ANSWER_KEYS: [&str; 2] = ["debate_translation", "debate_answer"];
const BASE_ANSWER_KEYS: [&str; 2] = ["base_translation", "base_answer"];
const REASON_KEY: &str = "Reason";
const SIDE_KEY: &str = "Supported Side";

/// Run-level metadata copied into every record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordMeta {
    pub start_time: String,
    pub end_time: String,
    pub model_name: String,
    pub temperature: f32,
    pub max_round: usize,
}

/// Serialized result of one debate instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateRecord {
    pub start_time: String,
    pub end_time: String,
    pub model_name: String,
    pub temperature: f32,
    pub num_players: usize,
    pub max_round: usize,
    pub rounds_played: usize,
    pub outcome: Outcome,
    pub success: bool,
    /// Mode fields, baseline, final answer, `Reason`, `Supported Side`
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    /// Agent display name → full message log
    pub players: BTreeMap<String, Vec<Message>>,
}

impl DebateRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        meta: RecordMeta,
        seed: &dyn DebateSeed,
        base_answer: &str,
        decision: &DecisionObject,
        outcome: Outcome,
        rounds_played: usize,
        players: Vec<(AgentRole, Conversation)>,
    ) -> Self {
        let mut fields = seed.record_fields();
        fields.insert(seed.base_answer_key().to_string(), json!(base_answer));
        fields.insert(seed.answer_key().to_string(), json!(decision.final_answer));
        fields.insert(REASON_KEY.to_string(), json!(decision.rationale));
        fields.insert(SIDE_KEY.to_string(), json!(decision.supported_side.as_str()));

        Self {
            start_time: meta.start_time,
            end_time: meta.end_time,
            model_name: meta.model_name,
            temperature: meta.temperature,
            num_players: AgentRole::CORE.len(),
            max_round: meta.max_round,
            rounds_played,
            outcome,
            success: outcome.is_success(),
            fields,
            players: players
                .into_iter()
                .map(|(role, conversation)| {
                    (role.display_name().to_string(), conversation.into_messages())
                })
                .collect(),
        }
    }

    pub fn final_answer(&self) -> &str {
        self.first_str(&ANSWER_KEYS)
    }

    pub fn base_answer(&self) -> &str {
        self.first_str(&BASE_ANSWER_KEYS)
    }

    pub fn reason(&self) -> &str {
        self.first_str(&[REASON_KEY])
    }

    pub fn supported_side(&self) -> &str {
        self.first_str(&[SIDE_KEY])
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Message log of one agent, if it took part
    pub fn player(&self, role: AgentRole) -> Option<&[Message]> {
        self.players.get(role.display_name()).map(Vec::as_slice)
    }

    fn first_str(&self, keys: &[&str]) -> &str {
        keys.iter().find_map(|k| self.field(k)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::decision::SupportedSide;
    use crate::debate::seed::{TopicSeed, TranslationSeed};

    fn meta() -> RecordMeta {
        RecordMeta {
            start_time: "2024-01-01_10:00:00".to_string(),
            end_time: "2024-01-01_10:01:00".to_string(),
            model_name: "claude-3-haiku-20240307".to_string(),
            temperature: 0.0,
            max_round: 3,
        }
    }

    fn moderator_log() -> Conversation {
        let mut conversation = Conversation::new();
        conversation.set_persona("Moderator", "persona").unwrap();
        conversation.append(Message::user("judge")).unwrap();
        conversation.append(Message::assistant("{}")).unwrap();
        conversation
    }

    #[test]
    fn test_translation_record_schema() {
        let seed = TranslationSeed::new("Hindi", "English", "src", "ref").unwrap();
        let decision = DecisionObject::new("final", "better", SupportedSide::Negative);
        let record = DebateRecord::assemble(
            meta(),
            &seed,
            "base",
            &decision,
            Outcome::Resolved,
            2,
            vec![(AgentRole::Moderator, moderator_log())],
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["outcome"], "resolved");
        assert_eq!(json["num_players"], 3);
        assert_eq!(json["debate_translation"], "final");
        assert_eq!(json["base_translation"], "base");
        assert_eq!(json["reference"], "ref");
        assert_eq!(json["Reason"], "better");
        assert_eq!(json["Supported Side"], "Negative");
        assert_eq!(json["players"]["Moderator"][0]["role"], "system");
        assert_eq!(json["players"]["Moderator"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_topic_record_accessors() {
        let seed = TopicSeed::new("Is it?").unwrap();
        let record = DebateRecord::assemble(
            meta(),
            &seed,
            "opening",
            &DecisionObject::undecided("failed to parse response from judge final decision"),
            Outcome::Unresolved,
            3,
            vec![],
        );

        assert!(!record.success);
        assert_eq!(record.final_answer(), "");
        assert_eq!(record.base_answer(), "opening");
        assert_eq!(record.field("debate_topic"), Some("Is it?"));
        assert!(record.reason().contains("judge final decision"));
        assert!(record.player(AgentRole::Judge).is_none());
    }

    #[test]
    fn test_record_json_roundtrip() {
        let seed = TopicSeed::new("Is it?").unwrap();
        let record = DebateRecord::assemble(
            meta(),
            &seed,
            "opening",
            &DecisionObject::new("Yes", "r", SupportedSide::Affirmative),
            Outcome::JudgeTieBreak,
            3,
            vec![(AgentRole::Moderator, moderator_log())],
        );
        let text = serde_json::to_string(&record).unwrap();
        let parsed: DebateRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, record);
        assert_eq!(parsed.final_answer(), "Yes");
    }
}
