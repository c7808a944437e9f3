//! CLI entrypoint for Multi-Agent Debate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use debate_application::{
    BatchItem, ConversationLogger, NoConversationLogger, RunBatchUseCase, RunDebateInput,
    RunDebateUseCase,
};
use debate_domain::{OutputFormat as RecordFormat, TopicSeed};
use debate_infrastructure::{
    AnthropicConfig, AnthropicGateway, ConfigLoader, FileConfig, JsonRecordStore,
    JsonlConversationLogger, LangPair, load_prompts, read_topic_corpus, read_translation_corpus,
};
use debate_presentation::{
    BatchProgressReporter, Cli, Command, ConsoleFormatter, DebateRepl,
    ProgressMode,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting Multi-Agent Debate");

    let config = load_config(&cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    let prompts_path = cli
        .prompts
        .clone()
        .or_else(|| config.debate.prompts.clone())
        .context("No prompt set given. Use --prompts <file> or set [debate].prompts")?;
    let prompts = load_prompts(&prompts_path)?;
    let settings = config.debate.to_settings()?;

    // === Dependency Injection ===
    let api_key = resolve_api_key(&cli, &config)?;
    let gateway = Arc::new(AnthropicGateway::new(AnthropicConfig::from_file(
        &config.provider,
        api_key,
    ))?);

    let logger: Arc<dyn ConversationLogger> = match &config.output.conversation_log {
        Some(path) => match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Writing debate transcript to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let use_case = Arc::new(
        RunDebateUseCase::new(gateway, Arc::new(prompts), settings)?.with_logger(logger),
    );

    let default_format = config.output.format.unwrap_or_default();
    let progress = ProgressMode::detect(cli.quiet, cli.plain);

    match cli.command {
        Some(Command::Translate {
            input,
            lang_pair,
            output_dir,
            ..
        }) => {
            let lang_pair: LangPair = lang_pair.parse()?;
            let items = read_translation_corpus(&input, &lang_pair)?;
            run_batch(use_case, &config, items, output_dir, cli.quiet).await
        }
        Some(Command::Topics {
            input, output_dir, ..
        }) => {
            let items = read_topic_corpus(&input)?;
            run_batch(use_case, &config, items, output_dir, cli.quiet).await
        }
        Some(Command::Debate {
            topic: Some(topic),
            output,
            save,
        }) => {
            let format = output.map(RecordFormat::from).unwrap_or(default_format);
            run_single(&use_case, &topic, format, save.as_deref(), progress).await
        }
        Some(Command::Debate {
            topic: None,
            output,
            ..
        }) => {
            let format = output.map(RecordFormat::from).unwrap_or(default_format);
            let repl = DebateRepl::new(use_case)
                .with_progress(progress)
                .with_format(format);
            repl.run().await?;
            Ok(())
        }
        None => {
            let repl = DebateRepl::new(use_case)
                .with_progress(progress)
                .with_format(default_format);
            repl.run().await?;
            Ok(())
        }
    }
}

fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false);

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "mad.log");
            let (file_writer, guard) = tracing_appender::non_blocking(appender);
            subscriber
                .with_writer(std::io::stderr.and(file_writer))
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            subscriber.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

/// File configuration with command-line overrides applied
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(model) = &cli.model {
        config.debate.model = model.clone();
    }
    if let Some(temperature) = cli.temperature {
        config.debate.temperature = temperature;
    }
    if let Some(max_round) = cli.max_round {
        config.debate.max_round = max_round;
    }
    if let Some(persona) = cli.judge_persona {
        config.debate.judge_persona = persona.to_string();
    }
    if let Some(path) = &cli.conversation_log {
        config.output.conversation_log = Some(path.clone());
    }
    if let Some(Command::Translate { batch, .. } | Command::Topics { batch, .. }) = &cli.command {
        if let Some(concurrency) = batch.concurrency {
            config.batch.concurrency = concurrency;
        }
        if batch.no_skip {
            config.batch.skip_existing = false;
        }
    }

    if let Err(e) = config.validate() {
        bail!("Invalid configuration: {}", e);
    }
    Ok(config)
}

fn resolve_api_key(cli: &Cli, config: &FileConfig) -> Result<String> {
    if let Some(path) = &cli.api_key_file {
        let key = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read API key file {}", path.display()))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("API key file {} is empty", path.display());
        }
        return Ok(key.to_string());
    }

    match config.provider.resolve_api_key() {
        Some(key) => Ok(key),
        None => bail!(
            "No API key found. Set {} or use --api-key-file",
            config.provider.api_key_env
        ),
    }
}

async fn run_single(
    use_case: &RunDebateUseCase<AnthropicGateway>,
    topic: &str,
    format: RecordFormat,
    save: Option<&Path>,
    progress: ProgressMode,
) -> Result<()> {
    let input = RunDebateInput::new("cli", TopicSeed::new(topic)?);

    let record = match progress.reporter() {
        Some(reporter) => {
            use_case
                .execute_with_progress(input, reporter.as_ref())
                .await?
        }
        None => use_case.execute(input).await?,
    };

    if let Some(path) = save {
        JsonRecordStore::write_to(path, &record)?;
        info!("Saved debate record to {}", path.display());
    }

    println!("{}", ConsoleFormatter::render(&record, format));
    Ok(())
}

async fn run_batch(
    use_case: Arc<RunDebateUseCase<AnthropicGateway>>,
    config: &FileConfig,
    items: Vec<BatchItem>,
    output_dir: PathBuf,
    quiet: bool,
) -> Result<()> {
    if items.is_empty() {
        warn!("Corpus contains no usable lines");
    }

    let store = Arc::new(JsonRecordStore::new(output_dir));
    let batch = RunBatchUseCase::new(use_case, store, config.batch.to_settings());

    let summary = if quiet {
        batch.execute(items).await
    } else {
        let progress = BatchProgressReporter::new();
        batch.execute_with_progress(items, &progress).await
    };

    println!("{}", ConsoleFormatter::format_batch_summary(&summary));
    if summary.failed > 0 {
        bail!("{} of {} debates failed", summary.failed, summary.total);
    }
    Ok(())
}
