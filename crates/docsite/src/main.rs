//! Docsite CLI - Documentation browser.
//!
//! Provides commands for:
//! - `serve`: Start the documentation server
//! - `categories`: List the remote catalog
//! - `show`: Print one section (or the whole page as HTML)
//! - `search`: Search section titles, descriptions and content

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CategoriesArgs, SearchArgs, ServeArgs, ShowArgs};
use docsite_config::{CliSettings, Config};
use error::CliError;
use output::Output;

/// Docsite - Documentation browser.
#[derive(Parser)]
#[command(name = "docsite", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover docsite.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Documentation API base URL (overrides config).
    #[arg(long, global = true, env = "DOCSITE_API_URL")]
    base_url: Option<String>,

    /// Enable verbose output (INFO level logging).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the documentation server.
    Serve(ServeArgs),
    /// List documentation categories and their sections.
    Categories(CategoriesArgs),
    /// Show a documentation section.
    Show(ShowArgs),
    /// Search the documentation.
    Search(SearchArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli, output: &Output) -> Result<(), CliError> {
    let base_settings = CliSettings {
        base_url: cli.base_url,
        ..CliSettings::default()
    };

    match cli.command {
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(args.execute(cli.config.as_deref(), base_settings, output))
        }
        Commands::Categories(args) => {
            let config = Config::load(cli.config.as_deref(), Some(&base_settings))?;
            args.execute(&config, output)
        }
        Commands::Show(args) => {
            let config = Config::load(cli.config.as_deref(), Some(&base_settings))?;
            args.execute(&config, output)
        }
        Commands::Search(args) => {
            let config = Config::load(cli.config.as_deref(), Some(&base_settings))?;
            args.execute(&config, output)
        }
    }
}
