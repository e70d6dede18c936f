//! cireview CLI - Command line interface for cireview
//!
//! Serves the repository analysis API or runs a single analysis locally.

mod commands;

use cireview_core::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::AnalyzeArgs;

/// cireview: LLM-backed repository review with a CI-run style report
#[derive(Parser, Debug)]
#[command(name = "cireview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Port to listen on (overrides config and env)
    #[arg(long, global = true, env = "PORT")]
    port: Option<u16>,

    /// Gemini model to use (overrides config and env)
    #[arg(long, global = true, env = "GEMINI_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Serve the HTTP API (default)
    #[command(visible_alias = "s")]
    Serve,

    /// Analyze one repository and print the report
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config = Config::load_with_overrides(cli.port, cli.model.clone())?;

    if cli.verbose {
        tracing::info!(
            port = config.server.port,
            model = %config.gemini.model,
            retry_limit = config.agent.retry_limit,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("cireview {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Analyze(args)) => {
            args.execute(cli.verbose, config).await?;
        }
        Some(Commands::Config) => {
            commands::config::execute(&config)?;
        }
        Some(Commands::Serve) | None => {
            commands::serve::execute(config).await?;
        }
    }

    Ok(())
}
