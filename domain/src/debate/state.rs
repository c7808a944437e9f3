//! Debate state machine
//!
//! ```text
//! Opening ──undecided──▶ Rebuttal(2) ──undecided──▶ … ──▶ Rebuttal(max_round)
//!    │                        │                                   │
//!    └──decided──▶ Resolved ◀─┴──decided──────────────────────────┤
//!                                                                 └─undecided─▶ JudgeTieBreak
//! ```
//!
//! `max_round` counts the opening, so it equals the maximum number of
//! Moderator judgments. The Judge runs at most once and always terminates
//! the debate.

use super::decision::DecisionObject;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

const ROUND_WORDS: [&str; 10] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
];

/// Label substituted for `##round##` in the Moderator prompt.
///
/// Words for rounds 1-10, numeric ordinals ("11th", "22nd") after that.
pub fn round_label(round: usize) -> String {
    if (1..=ROUND_WORDS.len()).contains(&round) {
        return ROUND_WORDS[round - 1].to_string();
    }
    let suffix = match (round % 10, round % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", round, suffix)
}

/// Where the debate currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebatePhase {
    /// Round 1: opening statements
    Opening,
    /// Round n (2..=max_round): each side rebuts the other's latest statement
    Rebuttal(usize),
    /// The Moderator produced a final answer
    Resolved,
    /// Rounds exhausted; the Judge picks among the sides' positions
    JudgeTieBreak,
}

impl DebatePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DebatePhase::Resolved | DebatePhase::JudgeTieBreak)
    }
}

/// How a finished debate ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The Moderator decided within the round budget
    Resolved,
    /// The Judge selected an answer after the rounds ran out
    JudgeTieBreak,
    /// Not even the Judge produced an answer
    Unresolved,
}

impl Outcome {
    /// The record's `success` flag
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Unresolved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Resolved => "resolved",
            Outcome::JudgeTieBreak => "judge_tie_break",
            Outcome::Unresolved => "unresolved",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mutable state of one debate instance.
///
/// Owned and mutated only by the engine's sequential turn loop.
#[derive(Debug, Clone)]
pub struct DebateState {
    max_round: usize,
    round_index: usize,
    phase: DebatePhase,
    affirmative_last: String,
    negative_last: String,
    moderator_decision: DecisionObject,
    final_decision: Option<DecisionObject>,
    outcome: Option<Outcome>,
}

impl DebateState {
    pub fn new(max_round: usize) -> Result<Self, DomainError> {
        if max_round == 0 {
            return Err(DomainError::InvalidRoundLimit(max_round));
        }
        Ok(Self {
            max_round,
            round_index: 1,
            phase: DebatePhase::Opening,
            affirmative_last: String::new(),
            negative_last: String::new(),
            moderator_decision: DecisionObject::default(),
            final_decision: None,
            outcome: None,
        })
    }

    pub fn max_round(&self) -> usize {
        self.max_round
    }

    pub fn round_index(&self) -> usize {
        self.round_index
    }

    pub fn round_label(&self) -> String {
        round_label(self.round_index)
    }

    pub fn phase(&self) -> DebatePhase {
        self.phase
    }

    pub fn affirmative_last(&self) -> &str {
        &self.affirmative_last
    }

    pub fn negative_last(&self) -> &str {
        &self.negative_last
    }

    pub fn moderator_decision(&self) -> &DecisionObject {
        &self.moderator_decision
    }

    pub fn record_affirmative(&mut self, statement: impl Into<String>) {
        self.affirmative_last = statement.into();
    }

    pub fn record_negative(&mut self, statement: impl Into<String>) {
        self.negative_last = statement.into();
    }

    /// Apply the Moderator's judgment for the current round and advance.
    ///
    /// Returns the phase the debate moved to. Ignored once terminated.
    pub fn record_moderator(&mut self, decision: DecisionObject) -> DebatePhase {
        if self.phase.is_terminal() {
            return self.phase;
        }

        let decided = decision.is_decided();
        self.moderator_decision = decision;

        self.phase = if decided {
            self.final_decision = Some(self.moderator_decision.clone());
            self.outcome = Some(Outcome::Resolved);
            DebatePhase::Resolved
        } else if self.round_index < self.max_round {
            self.round_index += 1;
            DebatePhase::Rebuttal(self.round_index)
        } else {
            DebatePhase::JudgeTieBreak
        };
        self.phase
    }

    /// Apply the Judge's selection. Always terminates the debate.
    pub fn record_judge(&mut self, decision: DecisionObject) -> Outcome {
        let outcome = if decision.is_decided() {
            Outcome::JudgeTieBreak
        } else {
            Outcome::Unresolved
        };
        self.phase = DebatePhase::JudgeTieBreak;
        self.final_decision = Some(decision);
        self.outcome = Some(outcome);
        outcome
    }

    pub fn is_terminated(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The decision the debate ended on (Moderator's or Judge's)
    pub fn final_decision(&self) -> Option<&DecisionObject> {
        self.final_decision.as_ref()
    }

    /// Number of completed Moderator judgments
    pub fn rounds_played(&self) -> usize {
        match self.phase {
            DebatePhase::Opening | DebatePhase::Rebuttal(_) => self.round_index - 1,
            DebatePhase::Resolved | DebatePhase::JudgeTieBreak => self.round_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::decision::SupportedSide;

    fn decided(answer: &str) -> DecisionObject {
        DecisionObject::new(answer, "because", SupportedSide::Affirmative)
    }

    #[test]
    fn test_round_labels() {
        assert_eq!(round_label(1), "first");
        assert_eq!(round_label(2), "second");
        assert_eq!(round_label(10), "tenth");
        assert_eq!(round_label(11), "11th");
        assert_eq!(round_label(12), "12th");
        assert_eq!(round_label(21), "21st");
        assert_eq!(round_label(22), "22nd");
        assert_eq!(round_label(103), "103rd");
        assert_eq!(round_label(113), "113th");
    }

    #[test]
    fn test_zero_rounds_rejected() {
        assert_eq!(
            DebateState::new(0).unwrap_err(),
            DomainError::InvalidRoundLimit(0)
        );
    }

    #[test]
    fn test_single_round_goes_straight_to_judge() {
        let mut state = DebateState::new(1).unwrap();
        assert_eq!(state.phase(), DebatePhase::Opening);
        let next = state.record_moderator(DecisionObject::undecided(""));
        assert_eq!(next, DebatePhase::JudgeTieBreak);
        assert_eq!(state.rounds_played(), 1);
        assert!(!state.is_terminated());
    }

    #[test]
    fn test_resolution_in_third_round() {
        let mut state = DebateState::new(3).unwrap();
        assert_eq!(
            state.record_moderator(DecisionObject::undecided("")),
            DebatePhase::Rebuttal(2)
        );
        assert_eq!(state.round_label(), "second");
        assert_eq!(
            state.record_moderator(DecisionObject::undecided("")),
            DebatePhase::Rebuttal(3)
        );
        assert_eq!(state.record_moderator(decided("X")), DebatePhase::Resolved);

        assert!(state.is_terminated());
        assert_eq!(state.outcome(), Some(Outcome::Resolved));
        assert_eq!(state.final_decision().unwrap().final_answer, "X");
        assert_eq!(state.rounds_played(), 3);
    }

    #[test]
    fn test_moderator_ignored_after_resolution() {
        let mut state = DebateState::new(3).unwrap();
        state.record_moderator(decided("X"));
        assert_eq!(state.record_moderator(decided("Y")), DebatePhase::Resolved);
        assert_eq!(state.final_decision().unwrap().final_answer, "X");
    }

    #[test]
    fn test_judge_outcomes() {
        let mut state = DebateState::new(1).unwrap();
        state.record_moderator(DecisionObject::undecided(""));
        assert_eq!(state.record_judge(decided("J")), Outcome::JudgeTieBreak);
        assert!(Outcome::JudgeTieBreak.is_success());

        let mut state = DebateState::new(1).unwrap();
        state.record_moderator(DecisionObject::undecided(""));
        assert_eq!(
            state.record_judge(DecisionObject::undecided("")),
            Outcome::Unresolved
        );
        assert!(state.is_terminated());
        assert!(!Outcome::Unresolved.is_success());
    }

    #[test]
    fn test_last_statements_tracked() {
        let mut state = DebateState::new(2).unwrap();
        state.record_affirmative("aff 1");
        state.record_negative("neg 1");
        state.record_affirmative("aff 2");
        assert_eq!(state.affirmative_last(), "aff 2");
        assert_eq!(state.negative_last(), "neg 1");
    }
}
