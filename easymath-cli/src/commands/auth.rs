//! API key management for the hosted model provider.

use anyhow::{Result, bail};
use clap::Args;
use dialoguer::{Password, theme::ColorfulTheme};
use easymath_models::auth::{KeySource, KeyStore, env_var};

use crate::generator::CREDENTIAL_SERVICE;

/// Provider whose key is managed
const PROVIDER: &str = "openai";

#[derive(Args, Debug)]
pub struct AuthArgs {
    /// Show which providers have a key and where it comes from
    #[arg(long, conflicts_with = "delete")]
    pub list: bool,

    /// Delete the key stored in the keyring
    #[arg(long)]
    pub delete: bool,
}

pub fn run(args: AuthArgs) -> Result<()> {
    let keys = KeyStore::new(CREDENTIAL_SERVICE);

    if args.list {
        let configured = keys.configured();
        if configured.is_empty() {
            println!("No API credentials configured.");
            println!();
            println!("Configure credentials with: easymath auth");
        } else {
            println!("Configured providers:");
            println!();
            for (provider, source) in configured {
                println!("  {} {}", provider, describe_source(source));
            }
        }
        return Ok(());
    }

    if args.delete {
        match keys.forget(PROVIDER) {
            Ok(()) => println!("Credentials for '{}' deleted.", PROVIDER),
            Err(easymath_models::Error::MissingKey(_)) => {
                println!("No credentials found for '{}'.", PROVIDER);
            }
            Err(e) => bail!("Failed to delete credentials: {}", e),
        }
        return Ok(());
    }

    let env_hint = env_var(PROVIDER)
        .map(|v| format!(" (or set {})", v))
        .unwrap_or_default();
    println!("Enter API key for {}{}", PROVIDER, env_hint);

    let key = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("API key")
        .interact()?;
    let key = key.trim();
    if key.is_empty() {
        bail!("API key cannot be empty");
    }

    keys.store(PROVIDER, key)?;
    println!("Credentials for '{}' saved to keyring.", PROVIDER);
    Ok(())
}

fn describe_source(source: KeySource) -> String {
    match source {
        KeySource::Keyring => "(keyring)".to_string(),
        KeySource::Environment(var) => format!("(environment: {})", var),
    }
}
