use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::Args;
use easymath_core::RemoveOutcome;

use crate::config::EasyMathConfig;

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Topic to remove from
    pub topic: String,

    /// Ids to remove; the remaining records are renumbered from 1
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<u32>,
}

pub fn run(args: RemoveArgs, config: &EasyMathConfig) -> Result<()> {
    let mut store = super::open_store(config)?;

    let ids: BTreeSet<u32> = args.ids.into_iter().collect();
    match store.remove(&args.topic, &ids)? {
        RemoveOutcome::TopicMissing => println!("Topic not found: {}", args.topic),
        RemoveOutcome::Removed { removed, remaining } => {
            println!(
                "Removed {} from {}, {} remaining",
                removed, args.topic, remaining
            );
        }
        RemoveOutcome::Rejected(reason) => bail!("Removal rejected: {}", reason),
    }
    Ok(())
}
