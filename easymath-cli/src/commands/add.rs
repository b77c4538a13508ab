//! Manual addition of a single statement.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{Confirm as Prompt, theme::ColorfulTheme};
use easymath_core::{Confirm, ManualAdd, Problem, TopicCollectionManager};
use tracing::warn;

use crate::config::EasyMathConfig;
use crate::generator::ConfiguredGenerator;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Topic to add the statement under
    pub topic: String,

    /// The statement text
    pub statement: String,

    /// Proof text; generated with the configured model when omitted
    #[arg(long)]
    pub proof: Option<String>,

    /// Show the statement and proof and ask before storing
    #[arg(long)]
    pub confirm: bool,

    /// Model to use instead of the configured one
    #[arg(long)]
    pub model: Option<String>,
}

/// Interactive yes/no approval on the terminal
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, topic: &str, candidate: &Problem) -> bool {
        println!("Topic: {}", topic);
        println!("Statement:\n{}", candidate.statement);
        println!("\n--------------------------------\n");
        println!("Proof:\n{}", candidate.proof);
        println!();

        Prompt::with_theme(&ColorfulTheme::default())
            .with_prompt("Do you want to add this proof to the dataset?")
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                warn!(error = %e, "confirmation prompt failed, not adding");
                false
            })
    }
}

pub async fn run(args: AddArgs, config: &EasyMathConfig) -> Result<()> {
    let generator = Arc::new(ConfiguredGenerator::new(config));
    if args.proof.is_none() {
        generator
            .ensure_ready()
            .context("A proof must be generated but no model provider is configured")?;
    }

    let params = super::generation_params(config, args.model);
    let store = super::open_store(config)?;
    let mut manager = TopicCollectionManager::new(store, generator);

    let confirm = TerminalConfirm;
    let outcome = manager
        .add_problem_manually(
            &args.topic,
            &args.statement,
            args.proof.as_deref(),
            args.confirm.then_some(&confirm as &dyn Confirm),
            &params,
        )
        .await?;

    println!("{}", describe(&args.topic, &outcome));
    Ok(())
}

fn describe(topic: &str, outcome: &ManualAdd) -> String {
    match outcome {
        ManualAdd::Added(problem) => format!("Proof added to {} as {}", topic, problem.id),
        ManualAdd::Declined => "Proof not added".to_string(),
        ManualAdd::Duplicate(id) => format!("Statement already present in {} as {}", topic, id),
    }
}
