//! Progress reporting for debates and corpus batches

use colored::Colorize;
use debate_application::{
    BatchProgressNotifier, BatchSummary, DebateProgressNotifier, InstanceStatus,
};
use debate_domain::{AgentRole, Outcome};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::sync::Mutex;
use std::time::Duration;

/// How a single debate reports progress on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// indicatif spinner ([`ProgressReporter`])
    Spinner,
    /// One line per event ([`SimpleProgress`])
    Plain,
    Off,
}

impl ProgressMode {
    /// Pick a mode from `--quiet` / `--plain`; a non-terminal stderr gets plain lines.
    pub fn detect(quiet: bool, plain: bool) -> Self {
        Self::select(quiet, plain, std::io::stderr().is_terminal())
    }

    fn select(quiet: bool, plain: bool, stderr_is_terminal: bool) -> Self {
        if quiet {
            ProgressMode::Off
        } else if plain || !stderr_is_terminal {
            ProgressMode::Plain
        } else {
            ProgressMode::Spinner
        }
    }

    pub fn reporter(self) -> Option<Box<dyn DebateProgressNotifier>> {
        match self {
            ProgressMode::Spinner => Some(Box::new(ProgressReporter::new())),
            ProgressMode::Plain => Some(Box::new(SimpleProgress)),
            ProgressMode::Off => None,
        }
    }
}

/// Reports one debate with a spinner that tracks round and speaker
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(spinner) = guard.as_ref()
        {
            f(spinner);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgressNotifier for ProgressReporter {
    fn on_debate_start(&self, _summary: &str, max_round: usize) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix("Opening");
        spinner.set_message(format!("up to {} rounds", max_round));
        spinner.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(spinner);
        }
    }

    fn on_round_start(&self, round: usize, label: &str) {
        self.with_spinner(|s| {
            s.set_prefix(format!("Round {} ({})", round, label));
            s.set_message("Affirmative side is speaking...");
        });
    }

    fn on_turn_complete(&self, role: AgentRole, _round: usize) {
        let next = match role {
            AgentRole::Baseline => "Affirmative side is speaking...",
            AgentRole::Affirmative => "Negative side is speaking...",
            AgentRole::Negative => "Moderator is deciding...",
            AgentRole::Moderator | AgentRole::Judge => "",
        };
        self.with_spinner(|s| {
            s.println(format!("  {} {}", "v".green(), role));
            s.set_message(next);
        });
    }

    fn on_moderator_decision(&self, round: usize, resolved: bool) {
        if !resolved {
            self.with_spinner(|s| {
                s.println(format!("  {} round {}: no decision yet", "-".yellow(), round));
            });
        }
    }

    fn on_judge_invoked(&self) {
        self.with_spinner(|s| {
            s.set_prefix("Judge");
            s.set_message("rounds exhausted, choosing between both sides...");
        });
    }

    fn on_debate_complete(&self, outcome: Outcome) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(spinner) = guard.take()
        {
            spinner.finish_and_clear();
        }
        let mark = if outcome.is_success() {
            "v".green()
        } else {
            "x".red()
        };
        eprintln!("{} Debate finished: {}", mark, outcome_label(outcome).bold());
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DebateProgressNotifier for SimpleProgress {
    fn on_debate_start(&self, summary: &str, max_round: usize) {
        eprintln!("{} {} (max {} rounds)", "->".cyan(), summary.bold(), max_round);
    }

    fn on_round_start(&self, round: usize, label: &str) {
        eprintln!("{} Round {} ({})", "->".cyan(), round, label);
    }

    fn on_turn_complete(&self, role: AgentRole, _round: usize) {
        eprintln!("  {} {}", "v".green(), role);
    }

    fn on_judge_invoked(&self) {
        eprintln!("{} Judge tie-break", "->".cyan());
    }

    fn on_debate_complete(&self, outcome: Outcome) {
        eprintln!("{} {}", "=>".cyan(), outcome_label(outcome));
        eprintln!();
    }
}

/// Progress bar over a corpus batch
pub struct BatchProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl BatchProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|s| s.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl Default for BatchProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProgressNotifier for BatchProgressReporter {
    fn on_batch_start(&self, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(Self::bar_style());
        bar.set_prefix("Debates");
        bar.set_message("Starting...");
        bar.enable_steady_tick(Duration::from_millis(200));

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_instance_complete(&self, id: &str, status: &InstanceStatus) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            if let InstanceStatus::Failed(reason) = status {
                bar.println(format!("  {} #{}: {}", "x".red(), id, reason));
            }
            bar.set_message(status_line(id, status));
            bar.inc(1);
        }
    }

    fn on_batch_complete(&self, summary: &BatchSummary) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_with_message(format!(
                "{} ({} succeeded)",
                "done".green(),
                summary.succeeded()
            ));
        }
    }
}

/// One-line description of an instance result
pub fn status_line(id: &str, status: &InstanceStatus) -> String {
    match status {
        InstanceStatus::Completed(outcome) => format!("#{} {}", id, outcome_label(*outcome)),
        InstanceStatus::Skipped => format!("#{} skipped (record exists)", id),
        InstanceStatus::Failed(_) => format!("#{} failed", id),
    }
}

pub fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Resolved => "resolved by the Moderator",
        Outcome::JudgeTieBreak => "decided by the Judge",
        Outcome::Unresolved => "unresolved",
    }
}
