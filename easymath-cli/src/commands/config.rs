use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{ConfigLoader, EasyMathConfig};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration as TOML
    Show,
    /// Print config file and dataset locations
    Path,
}

pub fn run(args: ConfigArgs, config: &EasyMathConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        ConfigCommands::Path => {
            println!("{}", describe_path("User config:   ", &ConfigLoader::user_config_path()));
            println!("{}", describe_path("Project config:", &ConfigLoader::project_config_path()));
            println!("{}", describe_path("Dataset:       ", &config.dataset.path));
        }
    }
    Ok(())
}

fn describe_path(label: &str, path: &Path) -> String {
    let state = if path.exists() { "" } else { " (not found)" };
    format!("{} {}{}", label, path.display(), state)
}
