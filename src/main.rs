//! Clio - changelog generator for conventional-commit histories
//!
//! This is the main entry point for the `clio` CLI. Logs go to stderr so the
//! rendered changelog on stdout can be piped or redirected.

mod cli;

use clap::{Parser, Subcommand};
use clio_core::error::Result;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};

use cli::config::ConfigAction;
use cli::generate::GenerateArgs;
use cli::helpers::HistoryArgs;

#[derive(Parser)]
#[command(name = "clio")]
#[command(about = "Generate release notes from conventional-commit history", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Configuration file (overrides CLIO_CONFIG env var and .clio.toml)
    #[arg(short, long, env = "CLIO_CONFIG", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a changelog from git history
    Generate(GenerateArgs),

    /// Parse a single commit message and show its category
    Parse {
        /// Full commit message (subject, optional blank line, body)
        message: String,
    },

    /// Export raw commits as JSON for later `generate --input`
    ExportCommits {
        #[command(flatten)]
        history: HistoryArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::new(format!(
        "clio={level},clio_core={level}",
        level = level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("Clio v{} starting...", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Generate(args) => cli::generate::handle(args, cli.config),
        Commands::Parse { message } => cli::parse::handle(message, cli.config),
        Commands::ExportCommits { history, output } => {
            cli::export::handle(history, output, cli.config)
        }
        Commands::Config { action } => cli::config::handle(action, cli.config),
    }
}
