//! medask CLI
//!
//! Main entry point for the medask command-line tool.
//! Answers biomedical questions grounded in a local passage corpus.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ClassifyCommand, RewriteCommand, StatsCommand};
use medask_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// medask - intent-aware grounded answers to biomedical questions
#[derive(Parser, Debug)]
#[command(name = "medask")]
#[command(about = "Intent-aware grounded answers to biomedical questions", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "MEDASK_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "MEDASK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Generation provider (ollama)
    #[arg(short, long, global = true, env = "MEDASK_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "MEDASK_MODEL")]
    model: Option<String>,

    /// Generation backend endpoint
    #[arg(long, global = true, env = "MEDASK_ENDPOINT")]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a question from the corpus
    Ask(AskCommand),

    /// Classify a question's intent
    Classify(ClassifyCommand),

    /// Rewrite a question into a retrieval query
    Rewrite(RewriteCommand),

    /// Show corpus index statistics
    Stats(StatsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Workspace and config file flags decide which YAML file is read
    let workspace = cli.workspace.clone();
    let config_file = cli.config.clone();
    let config = AppConfig::load_with(|key| match key {
        "MEDASK_WORKSPACE" => workspace.as_ref().map(|p| p.display().to_string()),
        "MEDASK_CONFIG" => config_file.as_ref().map(|p| p.display().to_string()),
        _ => std::env::var(key).ok(),
    })?;

    // Apply CLI overrides
    let config = config.with_overrides(
        None,
        None,
        cli.provider,
        cli.model,
        cli.endpoint,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    config.validate()?;

    // Log startup
    tracing::info!("medask CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    // Emit command.start span
    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Classify(_) => "classify",
        Commands::Rewrite(_) => "rewrite",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Classify(cmd) => cmd.execute(),
        Commands::Rewrite(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
