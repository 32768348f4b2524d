//! Commitflow CLI - Command line interface for Commitflow
//!
//! GitHub pull request automation: diff summaries and command relaying.

mod commands;

use clap::{Parser, Subcommand};
use commitflow_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{DeliverArgs, SummarizeArgs};

/// Commitflow: GitHub pull request automation
#[derive(Parser, Debug)]
#[command(name = "commitflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model to use for diff summaries (overrides config and env)
    #[arg(long, global = true, env = "COMMITFLOW_MODEL")]
    model: Option<String>,

    /// Base URL of the chat completions API (overrides config and env)
    #[arg(long, global = true, env = "COMMITFLOW_API_BASE")]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Process one webhook delivery
    #[command(visible_alias = "d")]
    Deliver(DeliverArgs),

    /// Summarize a pull request and post the summary as a comment
    #[command(visible_alias = "s")]
    Summarize(SummarizeArgs),

    /// Show current configuration
    Config {
        /// Write a secrets file template at the default location
        #[arg(long)]
        init_secrets: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.model.clone(), cli.api_base.clone())?;

    if cli.verbose {
        tracing::info!(
            model = %config.summarizer.model,
            api_base = %config.summarizer.api_base,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("commitflow {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Deliver(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Summarize(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Config { init_secrets }) => {
            if init_secrets {
                let path = Secrets::create_template()?;
                println!("Created secrets template: {}", path.display());
                println!();
            }

            println!("Commitflow Configuration");
            println!("========================");
            println!();
            println!("Command Settings:");
            println!("  tokens: {}", config.commands.tokens.join(", "));
            println!();
            println!("Summarizer Settings:");
            println!("  model: {}", config.summarizer.model);
            println!("  api_base: {}", config.summarizer.api_base);
            println!("  request_timeout: {:?}", config.summarizer.request_timeout);
            match config.summarizer.max_tokens {
                Some(max) => println!("  max_tokens: {}", max),
                None => println!("  max_tokens: (unlimited)"),
            }
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
            if let Some(path) = Secrets::default_secrets_path() {
                println!("Secrets file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - run 'commitflow config --init-secrets')");
                }
            }
        }
        None => {
            println!("Commitflow - GitHub pull request automation");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
