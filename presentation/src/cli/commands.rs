//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use debate_domain::JudgePersona;
use std::path::PathBuf;

/// Output format for a finished debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Topic, baseline, final answer and reason
    Summary,
    /// Summary plus every agent's full transcript
    Full,
    /// The debate record as JSON
    Json,
}

impl From<OutputFormat> for debate_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Summary => debate_domain::OutputFormat::Summary,
            OutputFormat::Full => debate_domain::OutputFormat::Full,
            OutputFormat::Json => debate_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for multi-agent-debate
#[derive(Parser, Debug)]
#[command(name = "mad")]
#[command(author, version, about = "Multi-Agent Debate - LLM personas argue until a moderator decides")]
#[command(long_about = r#"
Multi-Agent Debate runs an Affirmative and a Negative debater against each
other while a Moderator judges every round.

Each round:
1. Affirmative: argues (or rebuts the Negative side)
2. Negative: rebuts the freshest Affirmative statement
3. Moderator: decides, or lets the debate continue

If no round is decided within --max-round rounds, a Judge picks the final
answer from both sides' opening statements.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./debate.toml       Project-level config
3. ~/.config/multi-agent-debate/config.toml   Global config

Example:
  mad --prompts prompts/config4all.json debate "Is zero an even number?"
  mad --prompts prompts/config4tran.json translate -i zh-en.tsv --lang-pair Chinese-English -o out/
  mad --prompts prompts/config4all.json debate
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Prompt set (JSON object of templates)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub prompts: Option<PathBuf>,

    /// Model for every agent (overrides [debate].model)
    #[arg(short, long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature (overrides [debate].temperature)
    #[arg(short, long, global = true)]
    pub temperature: Option<f32>,

    /// Total Moderator judgments, opening round included
    #[arg(long, global = true, value_name = "N")]
    pub max_round: Option<usize>,

    /// Persona for the tie-break Judge: moderator | dedicated
    #[arg(long, global = true, value_name = "PERSONA")]
    pub judge_persona: Option<JudgePersona>,

    /// File holding the API key (instead of the environment variable)
    #[arg(long, global = true, value_name = "PATH")]
    pub api_key_file: Option<PathBuf>,

    /// Write every debate event to this JSONL file
    #[arg(long, global = true, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Also write diagnostic logs to daily files in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print progress as plain lines instead of a spinner
    #[arg(long, global = true)]
    pub plain: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Debate every `source<TAB>reference` line of a corpus
    Translate {
        /// Corpus file
        #[arg(short, long, value_name = "PATH")]
        input: PathBuf,

        /// Language names, e.g. Chinese-English
        #[arg(short, long, value_name = "SRC-TGT")]
        lang_pair: String,

        /// Directory receiving one <line>.json per instance
        #[arg(short, long, value_name = "DIR")]
        output_dir: PathBuf,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Debate one topic, or start the interactive prompt without one
    Debate {
        /// The topic or question
        topic: Option<String>,

        /// Output format
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,

        /// Also write the debate record to this file
        #[arg(long, value_name = "PATH")]
        save: Option<PathBuf>,
    },

    /// Debate every line of a topic file
    Topics {
        /// One topic per line
        #[arg(short, long, value_name = "PATH")]
        input: PathBuf,

        /// Directory receiving one <line>.json per instance
        #[arg(short, long, value_name = "DIR")]
        output_dir: PathBuf,

        #[command(flatten)]
        batch: BatchArgs,
    },
}

/// Batch options shared by corpus commands
#[derive(clap::Args, Debug, Clone)]
pub struct BatchArgs {
    /// Debates run at the same time (overrides [batch].concurrency)
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Re-run instances that already have a record
    #[arg(long)]
    pub no_skip: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_translate_command() {
        let cli = Cli::try_parse_from([
            "mad",
            "-vv",
            "--prompts",
            "p.json",
            "translate",
            "-i",
            "in.tsv",
            "--lang-pair",
            "Chinese-English",
            "-o",
            "out",
            "--concurrency",
            "8",
            "--no-skip",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.prompts, Some(PathBuf::from("p.json")));
        match cli.command {
            Some(Command::Translate {
                input,
                lang_pair,
                output_dir,
                batch,
            }) => {
                assert_eq!(input, PathBuf::from("in.tsv"));
                assert_eq!(lang_pair, "Chinese-English");
                assert_eq!(output_dir, PathBuf::from("out"));
                assert_eq!(batch.concurrency, Some(8));
                assert!(batch.no_skip);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_debate_command_with_overrides() {
        let cli = Cli::try_parse_from([
            "mad",
            "debate",
            "Is zero even?",
            "--output",
            "json",
            "--max-round",
            "5",
            "--judge-persona",
            "dedicated",
        ])
        .unwrap();

        assert_eq!(cli.max_round, Some(5));
        assert_eq!(cli.judge_persona, Some(JudgePersona::Dedicated));
        assert!(!cli.plain);
        match cli.command {
            Some(Command::Debate { topic, output, save }) => {
                assert_eq!(topic.as_deref(), Some("Is zero even?"));
                assert_eq!(output, Some(OutputFormat::Json));
                assert!(save.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_debate_without_topic_and_bad_persona() {
        let cli = Cli::try_parse_from(["mad", "debate", "--plain"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Debate { topic: None, .. })));
        assert!(cli.plain);

        assert!(Cli::try_parse_from(["mad", "--judge-persona", "jury", "debate"]).is_err());
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        assert_eq!(
            debate_domain::OutputFormat::from(OutputFormat::Full),
            debate_domain::OutputFormat::Full
        );
    }
}
