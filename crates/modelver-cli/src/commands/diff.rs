//! Diff command
//!
//! Usage: modelver diff <MODEL> <OLDER> [NEWER] [--json]
//!
//! NEWER defaults to the latest snapshot.

use clap::Args;
use modelver_core::diff::{compute_diff, render_human_summary};
use modelver_core::ModelKind;
use modelver_store::{load, StoreConfig};

use super::resolve_snapshot;

#[derive(Debug, Args)]
pub struct DiffArgs {
    pub model: ModelKind,

    pub older: String,

    pub newer: Option<String>,

    /// Emit the diff as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: DiffArgs, config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let older = load(&resolve_snapshot(config, args.model, Some(&args.older))?)?;
    let newer = load(&resolve_snapshot(config, args.model, args.newer.as_deref())?)?;

    let diff = compute_diff(&older.contents, &newer.contents)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        println!(
            "{} -> {}\n",
            older.snapshot.dir_name(),
            newer.snapshot.dir_name()
        );
        print!("{}", render_human_summary(&diff));
    }
    Ok(())
}
