//! Console output formatter for debate records

use colored::Colorize;
use debate_application::BatchSummary;
use debate_domain::{DebateRecord, OutputFormat};

/// Formats debate records for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a record in the requested format
    pub fn render(record: &DebateRecord, format: OutputFormat) -> String {
        match format {
            OutputFormat::Summary => Self::format_summary(record),
            OutputFormat::Full => Self::format(record),
            OutputFormat::Json => Self::format_json(record),
        }
    }

    /// Summary followed by every agent's transcript
    pub fn format(record: &DebateRecord) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Multi-Agent Debate"));
        output.push('\n');
        output.push_str(&Self::body(record));

        for (agent, messages) in &record.players {
            output.push_str(&Self::section_header(agent));
            for message in messages {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("[{}]", message.role).yellow().bold(),
                    Self::indent(&message.content, "  ")
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(record: &DebateRecord) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    /// Question, baseline and decision only
    pub fn format_summary(record: &DebateRecord) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n\n", "=== Debate Result ===".cyan().bold()));
        output.push_str(&Self::body(record));
        output
    }

    fn body(record: &DebateRecord) -> String {
        let mut output = String::new();

        if let Some(topic) = record.field("debate_topic") {
            output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), topic));
            output.push_str(&format!("{} {}\n\n", "Base answer:".bold(), record.base_answer()));
        } else {
            if let Some(source) = record.field("source") {
                output.push_str(&format!(
                    "{} {} ({} -> {})\n",
                    "Source:".cyan().bold(),
                    source,
                    record.field("src_lng").unwrap_or("?"),
                    record.field("tgt_lng").unwrap_or("?")
                ));
            }
            if let Some(reference) = record.field("reference") {
                output.push_str(&format!("{} {}\n", "Reference:".bold(), reference));
            }
            output.push_str(&format!(
                "{} {}\n\n",
                "Base translation:".bold(),
                record.base_answer()
            ));
        }

        let answer = record.final_answer();
        if answer.is_empty() {
            output.push_str(&format!("{}\n", "No final answer was reached.".red().bold()));
        } else {
            output.push_str(&format!("{}\n{}\n", "Debate answer:".green().bold(), answer));
        }
        if !record.reason().is_empty() {
            output.push_str(&format!("\n{} {}\n", "Reason:".bold(), record.reason()));
        }
        if !record.supported_side().is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Supported side:".bold(),
                record.supported_side()
            ));
        }

        output.push_str(&format!(
            "\n{} {} after {} of {} rounds ({})\n",
            "Outcome:".dimmed(),
            record.outcome,
            record.rounds_played,
            record.max_round,
            record.model_name
        ));
        output
    }

    /// Totals of a corpus run
    pub fn format_batch_summary(summary: &BatchSummary) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Batch Summary"));
        output.push_str(&format!("  Total:            {}\n", summary.total));
        output.push_str(&format!(
            "  Resolved:         {}\n",
            summary.resolved.to_string().green()
        ));
        output.push_str(&format!("  Judge tie-break:  {}\n", summary.judge_tie_break));
        output.push_str(&format!(
            "  Unresolved:       {}\n",
            summary.unresolved.to_string().yellow()
        ));
        output.push_str(&format!(
            "  Failed:           {}\n",
            summary.failed.to_string().red()
        ));
        output.push_str(&format!("  Skipped:          {}\n", summary.skipped));
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
