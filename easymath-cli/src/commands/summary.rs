//! Per-topic record counts.

use anyhow::Result;
use clap::Args;
use comfy_table::{
    Cell, CellAlignment, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED,
};
use easymath_core::TopicSummary;

use crate::config::EasyMathConfig;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Print "Topic: N proofs" lines instead of a table
    #[arg(long)]
    pub plain: bool,
}

pub fn run(args: SummaryArgs, config: &EasyMathConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let query = store.query();
    let summary = query.summary();

    if summary.is_empty() {
        println!("No topics in dataset.");
        return Ok(());
    }

    if args.plain {
        for entry in &summary {
            println!("{}", entry);
        }
    } else {
        println!("{}", render_table(&summary, query.total()));
    }
    Ok(())
}

fn render_table(summary: &[TopicSummary], total: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Topic").fg(Color::Cyan),
        Cell::new("Proofs").fg(Color::Cyan),
    ]);

    for entry in summary {
        table.add_row(vec![
            Cell::new(&entry.topic),
            Cell::new(entry.count).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(total).set_alignment(CellAlignment::Right),
    ]);
    table
}
