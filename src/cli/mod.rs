//! CLI module for Insight
//!
//! Running without a subcommand opens the window; every subcommand runs
//! headless against the same configuration and recommendation client.

mod commands;
mod output;
mod shell;

use clap::{Parser, Subcommand};

use crate::config::Config;
pub use output::OutputFormat;

/// Insight - game recommendations by title, theme and mood
#[derive(Parser, Debug)]
#[command(name = "insight")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    /// Recommendation service base URL (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch recommendations for a query and tone
    Recommend(commands::recommend::RecommendArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },

    /// Diagnostics and debugging
    Diag {
        #[command(subcommand)]
        command: commands::diag::DiagCommands,
    },

    /// Interactive shell with a persistent query
    Shell,
}

/// Load the configuration file and apply command-line overrides
pub fn load_config(cli: &Cli) -> Config {
    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    if let Some(url) = &cli.base_url {
        tracing::debug!("Service base URL overridden: {}", url);
        config.service.base_url = url.clone();
    }

    config
}

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.output.format();
    let quiet = cli.output.quiet;
    let config = load_config(&cli);

    match cli.command {
        Some(Commands::Shell) => shell::run(config).await,
        Some(command) => dispatch(command, &config, format, quiet).await,
        None => Ok(()),
    }
}

/// Run one non-interactive command
async fn dispatch(
    command: Commands,
    config: &Config,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    match command {
        Commands::Recommend(args) => commands::recommend::run(args, config, format, quiet).await,
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
        Commands::Diag { command } => commands::diag::run(command, config, format, quiet).await,
        Commands::Shell => anyhow::bail!("Already in shell mode."),
    }
}
