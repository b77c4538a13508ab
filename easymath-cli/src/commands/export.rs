//! Dump the dataset as one JSON document.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use easymath_core::Dataset;

use crate::config::EasyMathConfig;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only export these topics (repeatable)
    #[arg(long = "topic", value_name = "TOPIC")]
    pub topics: Vec<String>,
}

pub fn run(args: ExportArgs, config: &EasyMathConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let json = render(store.dataset(), &args.topics)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported dataset to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}

fn render(dataset: &Dataset, topics: &[String]) -> Result<String> {
    let json = if topics.is_empty() {
        serde_json::to_string_pretty(dataset)?
    } else {
        let subset: Dataset = dataset
            .topics()
            .filter(|(topic, _)| topics.iter().any(|t| t.as_str() == *topic))
            .map(|(topic, problems)| (topic.to_string(), problems.to_vec()))
            .collect();
        serde_json::to_string_pretty(&subset)?
    };
    Ok(json)
}
