//! CLI entrypoint for maestro
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use maestro_application::{
    ConversationLogger, ExecutionParams, NoConversationLogger, RunWorkflowInput,
    RunWorkflowUseCase,
};
use maestro_domain::{Model, WorkspaceLayout};
use maestro_infrastructure::{
    CapabilityRegistry, ConfigLoader, DeepseekGateway, JsonSchemaToolConverter,
    JsonlConversationLogger, MusicGenerator, StemSeparator, Transcriber, workspace,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Natural-language audio-processing agent: separate stems, transcribe to
/// MIDI, and generate music by talking to it.
#[derive(Parser, Debug)]
#[command(name = "maestro", version, about)]
struct Cli {
    /// What to do, in plain language (e.g. "isolate the vocals from song.mp3")
    prompt: Option<String>,

    /// Path to an audio file the prompt refers to
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Model identifier (e.g. deepseek-chat, deepseek-reasoner)
    #[arg(short, long)]
    model: Option<String>,

    /// Workspace root directory (overrides config)
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Maximum model invocations per run (overrides config)
    #[arg(long)]
    max_turns: Option<usize>,

    /// Explicit config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip all config files and use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let Some(prompt) = cli.prompt else {
        bail!("A prompt is required, e.g.: maestro \"separate the vocals\" --file song.mp3");
    };

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    info!("Starting maestro");

    // === Dependency Injection ===
    let layout = WorkspaceLayout::new(cli.workspace.unwrap_or(config.workspace.root.clone()));
    workspace::bootstrap(&layout).with_context(|| {
        format!(
            "could not create workspace directories under {}",
            layout.root().display()
        )
    })?;

    let timeout = Duration::from_secs(config.tools.timeout_secs);
    let registry = CapabilityRegistry::new(
        StemSeparator::new(layout.clone(), &config.tools.demucs_command, timeout),
        Transcriber::new(layout.clone(), &config.tools.basic_pitch_command, timeout),
        MusicGenerator::new(layout.clone(), &config.tools.musicgen_command, timeout),
    )?;

    let gateway = Arc::new(DeepseekGateway::from_config(&config.provider)?);

    let logger: Arc<dyn ConversationLogger> = match &config.logging.conversation_log {
        Some(path) => match JsonlConversationLogger::new(path) {
            Some(l) => Arc::new(l),
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let use_case = RunWorkflowUseCase::new(
        gateway,
        Arc::new(registry),
        Arc::new(JsonSchemaToolConverter),
        logger,
    );

    let model: Model = match cli.model {
        Some(s) => s.parse()?,
        None => config.provider.model.parse()?,
    };
    let max_turns = cli.max_turns.unwrap_or(config.agent.max_turns);

    let mut input = RunWorkflowInput::new(prompt)
        .with_model(model)
        .with_execution(ExecutionParams::default().with_max_turns(max_turns));
    if let Some(file) = &cli.file {
        if !file.exists() {
            bail!("Audio file not found: {}", file.display());
        }
        input = input.with_uploaded_file(file.display().to_string());
    }

    let output = use_case.execute(input).await?;

    info!(
        invocations = output.model_invocations,
        timed_out = output.timed_out(),
        "Run finished"
    );
    println!("{}", output.answer);

    if output.timed_out() {
        std::process::exit(2);
    }
    Ok(())
}
