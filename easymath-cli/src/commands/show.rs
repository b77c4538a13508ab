use anyhow::Result;
use clap::Args;
use easymath_core::Problem;

use crate::config::EasyMathConfig;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Topic name, e.g. "Set Theory"
    pub topic: String,

    /// Record id within the topic
    pub id: String,
}

/// Print one statement with its proof. A missing record is reported, not an error.
pub fn run(args: ShowArgs, config: &EasyMathConfig) -> Result<()> {
    let store = super::open_store(config)?;
    match store.query().find(&args.topic, &args.id) {
        Ok(problem) => println!("{}", render(problem)),
        Err(not_found) => println!("{}", not_found),
    }
    Ok(())
}

fn render(problem: &Problem) -> String {
    format!(
        "Statement:\n{}\n\n--------------------------------\n\nProof:\n{}",
        problem.statement, problem.proof
    )
}
