use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod generator;

use config::ConfigLoader;

#[derive(Parser)]
#[command(name = "easymath", about = "Build a dataset of easy math statements with proofs")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Dataset file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    dataset: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a statement by hand
    Add(commands::add::AddArgs),
    /// Manage the model provider API key
    Auth(commands::auth::AuthArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Write the dataset as JSON
    Export(commands::export::ExportArgs),
    /// Generate statements and proofs for topics
    Generate(commands::generate::GenerateArgs),
    /// Remove problems from a topic and renumber it
    Remove(commands::remove::RemoveArgs),
    /// Show one statement and its proof
    Show(commands::show::ShowArgs),
    /// Count proofs per topic
    Summary(commands::summary::SummaryArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ConfigLoader::load()?;
    if let Some(path) = cli.dataset {
        config.dataset.path = path;
    }

    match cli.command {
        Commands::Add(args) => commands::add::run(args, &config).await,
        Commands::Auth(args) => commands::auth::run(args),
        Commands::Config(args) => commands::config::run(args, &config),
        Commands::Export(args) => commands::export::run(args, &config),
        Commands::Generate(args) => commands::generate::run(args, &config).await,
        Commands::Remove(args) => commands::remove::run(args, &config),
        Commands::Show(args) => commands::show::run(args, &config),
        Commands::Summary(args) => commands::summary::run(args, &config),
    }
}
