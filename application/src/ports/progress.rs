//! Progress notification port
//!
//! Defines the interface for reporting progress during debates and batches.

use crate::use_cases::run_batch::{BatchSummary, InstanceStatus};
use debate_domain::{AgentRole, Outcome};

/// Callback for progress updates during one debate
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain log lines, etc.)
pub trait DebateProgressNotifier: Send + Sync {
    /// Called once before any model call
    fn on_debate_start(&self, summary: &str, max_round: usize);

    /// Called when a round begins (`label` is "first", "second", ...)
    fn on_round_start(&self, round: usize, label: &str);

    /// Called after an agent's reply has been recorded
    fn on_turn_complete(&self, role: AgentRole, round: usize);

    /// Called after the Moderator's reply has been normalized
    fn on_moderator_decision(&self, _round: usize, _resolved: bool) {}

    /// Called when the rounds ran out and the Judge takes over
    fn on_judge_invoked(&self) {}

    /// Called once the debate terminated
    fn on_debate_complete(&self, outcome: Outcome);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DebateProgressNotifier for NoProgress {
    fn on_debate_start(&self, _summary: &str, _max_round: usize) {}
    fn on_round_start(&self, _round: usize, _label: &str) {}
    fn on_turn_complete(&self, _role: AgentRole, _round: usize) {}
    fn on_debate_complete(&self, _outcome: Outcome) {}
}

/// Callback for progress updates across a corpus batch
pub trait BatchProgressNotifier: Send + Sync {
    fn on_batch_start(&self, total: usize);

    /// Called once per instance, in completion order
    fn on_instance_complete(&self, id: &str, status: &InstanceStatus);

    fn on_batch_complete(&self, _summary: &BatchSummary) {}
}

/// No-op batch notifier
pub struct NoBatchProgress;

impl BatchProgressNotifier for NoBatchProgress {
    fn on_batch_start(&self, _total: usize) {}
    fn on_instance_complete(&self, _id: &str, _status: &InstanceStatus) {}
}
