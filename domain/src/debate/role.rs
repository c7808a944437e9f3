//! Debate agent identities

use serde::{Deserialize, Serialize};

/// Identity of an agent taking part in a debate instance.
///
/// The display names are the keys of the record's `players` mapping and
/// must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentRole {
    Affirmative,
    Negative,
    Moderator,
    Judge,
    Baseline,
}

impl AgentRole {
    /// The three roles present in every debate instance
    pub const CORE: [AgentRole; 3] = [
        AgentRole::Affirmative,
        AgentRole::Negative,
        AgentRole::Moderator,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentRole::Affirmative => "Affirmative side",
            AgentRole::Negative => "Negative side",
            AgentRole::Moderator => "Moderator",
            AgentRole::Judge => "Judge",
            AgentRole::Baseline => "Baseline",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Affirmative => "affirmative",
            AgentRole::Negative => "negative",
            AgentRole::Moderator => "moderator",
            AgentRole::Judge => "judge",
            AgentRole::Baseline => "baseline",
        }
    }

    /// Whether this role argues a side (as opposed to judging)
    pub fn is_debater(&self) -> bool {
        matches!(self, AgentRole::Affirmative | AgentRole::Negative)
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_are_record_keys() {
        assert_eq!(AgentRole::Affirmative.to_string(), "Affirmative side");
        assert_eq!(AgentRole::Negative.to_string(), "Negative side");
        assert_eq!(AgentRole::Moderator.to_string(), "Moderator");
        assert_eq!(AgentRole::Judge.to_string(), "Judge");
    }

    #[test]
    fn test_debaters() {
        assert!(AgentRole::Affirmative.is_debater());
        assert!(AgentRole::Negative.is_debater());
        assert!(!AgentRole::Moderator.is_debater());
        assert!(!AgentRole::Judge.is_debater());
        assert!(!AgentRole::Baseline.is_debater());
    }
}
