//! aihooks CLI — entry point.
//!
//! # Commands
//!
//! - `aihooks run [TEXT] --task T` — apply a task to TEXT (or stdin) once
//! - `aihooks chat` — interactive REPL applying a task to every line
//! - `aihooks providers` — show supported providers and their status
//! - `aihooks init` — write a template config file

mod helpers;
mod init;
mod providers;
mod repl;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use aihooks_core::config::{load_config, Config};
use aihooks_core::{InvokeOptions, TaskType};
use aihooks_providers::AiHooks;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// One call surface over many LLM providers.
#[derive(Parser, Debug)]
#[command(name = "aihooks", version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.aihooks/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a task once over TEXT (reads stdin when TEXT is omitted)
    Run {
        /// Input text
        text: Option<String>,

        #[command(flatten)]
        invoke: InvokeArgs,

        /// Print the full result envelope as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Interactive REPL; every line goes through the same task
    Chat {
        #[command(flatten)]
        invoke: InvokeArgs,
    },

    /// Show supported providers and their status
    Providers,

    /// Write a template config file
    Init {
        /// Overwrite an existing config
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

/// Options shared by `run` and `chat`.
#[derive(Args, Debug, Clone, Default)]
struct InvokeArgs {
    /// Task to apply (summarize, translate, explain, rewrite, sentiment, codeReview)
    #[arg(short, long)]
    task: Option<TaskType>,

    /// Provider to use (default: resolved from the configured set)
    #[arg(short, long)]
    provider: Option<String>,

    /// Model to use (default: the provider's default model)
    #[arg(short, long)]
    model: Option<String>,

    /// Target language for `translate`
    #[arg(long)]
    lang: Option<String>,
}

impl From<InvokeArgs> for InvokeOptions {
    fn from(args: InvokeArgs) -> Self {
        InvokeOptions {
            task: args.task,
            provider: args.provider,
            model: args.model,
            target_language: args.lang,
        }
    }
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.logs);

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            helpers::print_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .as_deref()
        .and_then(|p| p.to_str())
        .map(helpers::expand_tilde);

    match cli.command {
        Commands::Run { text, invoke, json } => {
            let config = load_config(config_path.as_deref());
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            run_once(&config, &text, invoke.into(), json).await
        }
        Commands::Chat { invoke } => {
            let config = load_config(config_path.as_deref());
            let hooks = AiHooks::from_config(&config)?;
            repl::run(hooks, invoke.into()).await
        }
        Commands::Providers => providers::run(config_path.as_deref()),
        Commands::Init { force } => init::run(config_path.as_deref(), force),
    }
}

// ─────────────────────────────────────────────
// Run command
// ─────────────────────────────────────────────

async fn run_once(config: &Config, text: &str, options: InvokeOptions, json: bool) -> Result<()> {
    let hooks = AiHooks::from_config(config)?;
    let result = hooks.run(text, &options).await?;
    info!(
        provider = %result.meta.provider,
        model = %result.meta.model,
        latency_ms = result.meta.latency_ms,
        "task complete"
    );
    println!("{}", helpers::format_output(&result, json)?);
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    if input.trim().is_empty() {
        bail!("no input text: pass TEXT or pipe it on stdin");
    }
    Ok(input)
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("aihooks=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
