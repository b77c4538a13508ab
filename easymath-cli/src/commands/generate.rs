//! Batch generation for one or more topics.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;
use easymath_core::{BatchReport, TopicCollectionManager};
use tracing::info;

use crate::config::EasyMathConfig;
use crate::generator::ConfiguredGenerator;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Topic to generate for (repeatable, defaults to the configured list)
    #[arg(long = "topic", value_name = "TOPIC")]
    pub topics: Vec<String>,

    /// Problems to request per topic
    #[arg(long)]
    pub count: Option<usize>,

    /// Model to use instead of the configured one
    #[arg(long)]
    pub model: Option<String>,
}

pub async fn run(args: GenerateArgs, config: &EasyMathConfig) -> Result<()> {
    let topics = if args.topics.is_empty() {
        config.generation.topics.clone()
    } else {
        args.topics
    };
    if topics.is_empty() {
        bail!("No topics to generate. Pass --topic or set generation.topics in config.");
    }

    let count = args.count.unwrap_or(config.generation.problems_per_topic);
    let params = super::generation_params(config, args.model);

    let generator = Arc::new(ConfiguredGenerator::new(config));
    generator
        .ensure_ready()
        .context("Model provider is not configured. Run `easymath auth` or set OPENAI_API_KEY")?;

    let store = super::open_store(config)?;
    let mut manager = TopicCollectionManager::new(store, generator);

    info!(topics = topics.len(), count, model = %params.model, "generating problems");
    let reports = manager.add_topics(&topics, count, &params).await?;

    for report in &reports {
        println!("{}", describe(report));
    }
    println!();
    println!(
        "{} topics, {} proofs in {}",
        manager.query().summary().len(),
        manager.query().total(),
        manager.store().path().display()
    );
    Ok(())
}

fn describe(report: &BatchReport) -> String {
    if let Some(error) = &report.error {
        return format!("{}: generation failed ({})", report.topic, error);
    }
    let mut line = format!("{}: added {}", report.topic, report.added.len());
    if report.duplicates > 0 {
        line.push_str(&format!(", skipped {} duplicates", report.duplicates));
    }
    line
}
