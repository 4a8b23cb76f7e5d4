//! Eval command
//!
//! Usage: modelver eval <MODEL> --reference <DIR> [--id <SNAPSHOT>] [--json]
//!
//! The reference directory uses the snapshot artifact layout.

use clap::Args;
use modelver_core::eval::evaluate;
use modelver_core::ModelKind;
use modelver_store::version_store::load_dir;
use modelver_store::{load, StoreConfig};
use std::path::PathBuf;

use super::resolve_snapshot;

#[derive(Debug, Args)]
pub struct EvalArgs {
    pub model: ModelKind,

    /// Directory holding the reference artifacts
    #[arg(long)]
    pub reference: PathBuf,

    /// Snapshot to score (defaults to the latest)
    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: EvalArgs, config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    if !args.reference.is_dir() {
        return Err(format!("reference directory not found: {}", args.reference.display()).into());
    }

    let generated = load(&resolve_snapshot(config, args.model, args.id.as_deref())?)?;
    let (reference, _) = load_dir(args.model, &args.reference)?;

    let report = evaluate(&generated.contents, &reference)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} vs {}", generated.snapshot.dir_name(), args.reference.display());
    for score in &report.scores {
        println!(
            "{:<16}{:>4}/{:<4} {:.3}",
            score.kind.collection_name(),
            score.correct,
            score.generated,
            score.score
        );
    }
    if let Some(consistency) = report.logical_consistency {
        println!("{:<16}{:>14.3}", "consistency", consistency);
    }
    Ok(())
}
