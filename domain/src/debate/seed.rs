//! Debate seeds: what a debate instance is about.
//!
//! A seed supplies the placeholder values that turn the generic prompt set
//! into the opening prompts of one instance, decides where the baseline
//! answer comes from, and names the mode-specific record fields. New debate
//! modes plug in by implementing [`DebateSeed`].

use crate::core::error::DomainError;
use crate::prompt::TemplateVars;
use serde_json::{Map, Value, json};

/// Built-in debate modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebateMode {
    /// Critique and improve a machine translation
    Translation,
    /// Open question or topic
    Topic,
}

impl DebateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateMode::Translation => "translation",
            DebateMode::Topic => "topic",
        }
    }
}

/// Where the record's baseline answer comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineSource {
    /// Supplied with the input
    Provided(String),
    /// Asked from a Baseline agent before the opening round
    Generate,
    /// The Affirmative side's opening statement
    AffirmativeOpening,
}

/// Opening-prompt builder for one debate mode
pub trait DebateSeed: Send + Sync + std::fmt::Debug {
    fn mode(&self) -> DebateMode;

    /// Placeholder values applied to every template before round 1
    fn vars(&self) -> TemplateVars;

    fn baseline(&self) -> BaselineSource;

    /// Record key (and placeholder name) of the baseline answer
    fn base_answer_key(&self) -> &'static str;

    /// Record key of the final answer
    fn answer_key(&self) -> &'static str;

    /// Mode-specific fields of the produced record, baseline excluded
    fn record_fields(&self) -> Map<String, Value>;

    /// Short human-readable description for logs and headers
    fn summary(&self) -> &str;
}

/// Translation debate: source sentence, reference, language pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSeed {
    src_lng: String,
    tgt_lng: String,
    source: String,
    reference: String,
    base_translation: String,
}

impl TranslationSeed {
    pub fn new(
        src_lng: impl Into<String>,
        tgt_lng: impl Into<String>,
        source: impl Into<String>,
        reference: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let seed = Self {
            src_lng: src_lng.into(),
            tgt_lng: tgt_lng.into(),
            source: source.into(),
            reference: reference.into(),
            base_translation: String::new(),
        };
        if seed.source.trim().is_empty() {
            return Err(DomainError::InvalidSeed("source text is empty".to_string()));
        }
        if seed.src_lng.trim().is_empty() || seed.tgt_lng.trim().is_empty() {
            return Err(DomainError::InvalidSeed("language pair is incomplete".to_string()));
        }
        Ok(seed)
    }

    /// Skip the Baseline agent and critique this translation instead
    pub fn with_base_translation(mut self, base_translation: impl Into<String>) -> Self {
        self.base_translation = base_translation.into();
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl DebateSeed for TranslationSeed {
    fn mode(&self) -> DebateMode {
        DebateMode::Translation
    }

    fn vars(&self) -> TemplateVars {
        TemplateVars::new()
            .with("src_lng", &self.src_lng)
            .with("tgt_lng", &self.tgt_lng)
            .with("source", &self.source)
            .with("base_translation", &self.base_translation)
    }

    fn baseline(&self) -> BaselineSource {
        if self.base_translation.trim().is_empty() {
            BaselineSource::Generate
        } else {
            BaselineSource::Provided(self.base_translation.clone())
        }
    }

    fn base_answer_key(&self) -> &'static str {
        "base_translation"
    }

    fn answer_key(&self) -> &'static str {
        "debate_translation"
    }

    fn record_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("src_lng".into(), json!(self.src_lng));
        fields.insert("tgt_lng".into(), json!(self.tgt_lng));
        fields.insert("source".into(), json!(self.source));
        fields.insert("reference".into(), json!(self.reference));
        fields
    }

    fn summary(&self) -> &str {
        &self.source
    }
}

/// Open-topic debate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSeed {
    debate_topic: String,
}

impl TopicSeed {
    pub fn new(debate_topic: impl Into<String>) -> Result<Self, DomainError> {
        let debate_topic = debate_topic.into().trim().to_string();
        if debate_topic.is_empty() {
            return Err(DomainError::InvalidSeed("debate topic is empty".to_string()));
        }
        Ok(Self { debate_topic })
    }

    pub fn topic(&self) -> &str {
        &self.debate_topic
    }
}

impl DebateSeed for TopicSeed {
    fn mode(&self) -> DebateMode {
        DebateMode::Topic
    }

    fn vars(&self) -> TemplateVars {
        TemplateVars::new().with("debate_topic", &self.debate_topic)
    }

    fn baseline(&self) -> BaselineSource {
        BaselineSource::AffirmativeOpening
    }

    fn base_answer_key(&self) -> &'static str {
        "base_answer"
    }

    fn answer_key(&self) -> &'static str {
        "debate_answer"
    }

    fn record_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("debate_topic".into(), json!(self.debate_topic));
        fields
    }

    fn summary(&self) -> &str {
        &self.debate_topic
    }
}
