//! REPL (Read-Eval-Print Loop) for interactive topic debates

use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressMode;
use debate_application::{LlmGateway, RunDebateInput, RunDebateUseCase};
use debate_domain::{OutputFormat, TopicSeed};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What a line typed at the prompt asks for
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Help,
    Empty,
    Unknown(&'a str),
    Topic(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match line {
            "" => Input::Empty,
            "quit" | "exit" | "q" | "/quit" | "/exit" | "/q" => Input::Quit,
            "/help" | "/h" | "/?" => Input::Help,
            cmd if cmd.starts_with('/') => Input::Unknown(cmd),
            topic => Input::Topic(topic),
        }
    }
}

/// Interactive topic debate REPL
pub struct DebateRepl<G: LlmGateway + 'static> {
    use_case: Arc<RunDebateUseCase<G>>,
    progress: ProgressMode,
    format: OutputFormat,
    debates: AtomicUsize,
}

impl<G: LlmGateway + 'static> DebateRepl<G> {
    pub fn new(use_case: Arc<RunDebateUseCase<G>>) -> Self {
        Self {
            use_case,
            progress: ProgressMode::Spinner,
            format: OutputFormat::Summary,
            debates: AtomicUsize::new(0),
        }
    }

    /// Set how debates report progress
    pub fn with_progress(mut self, mode: ProgressMode) -> Self {
        self.progress = mode;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path =
            dirs::data_dir().map(|p| p.join("multi-agent-debate").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("topic> ") {
                Ok(line) => match Input::parse(&line) {
                    Input::Quit => {
                        println!("Bye!");
                        break;
                    }
                    Input::Help => Self::print_help(),
                    Input::Empty => {
                        println!("Please enter a topic (or 'quit' to leave).");
                    }
                    Input::Unknown(cmd) => {
                        println!("Unknown command: {}", cmd);
                        println!("Type /help for available commands");
                    }
                    Input::Topic(topic) => {
                        let _ = rl.add_history_entry(topic);
                        self.process_topic(topic).await;
                    }
                },
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        let settings = self.use_case.settings();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│      Multi-Agent Debate - Interactive       │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Model: {}  |  Rounds: {}  |  Judge: {}",
            settings.model, settings.max_round, settings.judge_persona
        );
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Type a topic or question and press Enter to start a debate.");
        println!();
        println!("Commands:");
        println!("  /help, /h, /?          - Show this help");
        println!("  quit, exit, q          - Leave");
        println!();
    }

    async fn process_topic(&self, topic: &str) {
        println!();

        let seed = match TopicSeed::new(topic) {
            Ok(seed) => seed,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        };
        let n = self.debates.fetch_add(1, Ordering::Relaxed);
        let input = RunDebateInput::new(format!("interactive-{}", n), seed);

        let result = match self.progress.reporter() {
            Some(progress) => {
                self.use_case
                    .execute_with_progress(input, progress.as_ref())
                    .await
            }
            None => self.use_case.execute(input).await,
        };

        match result {
            Ok(record) => println!("{}", ConsoleFormatter::render(&record, self.format)),
            Err(e) => eprintln!("Error: {}", e),
        }
        println!();
    }
}
