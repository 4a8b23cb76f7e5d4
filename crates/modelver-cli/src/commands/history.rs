//! History command
//!
//! Usage: modelver history <MODEL> [--id <SNAPSHOT>]

use clap::Args;
use modelver_core::ModelKind;
use modelver_store::lineage::history;
use modelver_store::StoreConfig;

use super::resolve_snapshot;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    pub model: ModelKind,

    /// Start from this snapshot instead of the latest
    #[arg(long)]
    pub id: Option<String>,
}

pub fn execute(args: HistoryArgs, config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let from = resolve_snapshot(config, args.model, args.id.as_deref())?;

    for entry in history(config, args.model, &from)? {
        println!(
            "{}\t{}\t{}",
            entry.snapshot.dir_name(),
            entry.created_at.as_deref().unwrap_or("-"),
            entry
                .change_request
                .as_deref()
                .map(first_line)
                .unwrap_or("(no change record)")
        );
    }
    Ok(())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}
