//! Apply command
//!
//! Usage: modelver apply <MODEL> --responses <DIR> (--request <TEXT> | --request-file <FILE>) [--dry-run]
//!
//! Runs one change cycle, reading each collection's collaborator answer from
//! `<DIR>/<collection>.txt`.

use clap::Args;
use modelver_core::ModelKind;
use modelver_engine::{run_cycle_with, CycleOptions, ReplayProposer};
use modelver_store::{SnapshotRef, StoreConfig};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    pub model: ModelKind,

    /// Directory of recorded responses
    #[arg(long)]
    pub responses: PathBuf,

    /// Change request text
    #[arg(long, conflicts_with = "request_file")]
    pub request: Option<String>,

    /// Read the change request from a file
    #[arg(long, conflicts_with = "request")]
    pub request_file: Option<PathBuf>,

    /// Merge and report without writing a snapshot
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute(args: ApplyArgs, config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let request = match (args.request, &args.request_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err("Must specify either --request or --request-file".into()),
    };
    if request.trim().is_empty() {
        return Err("change request is empty".into());
    }
    if !args.responses.is_dir() {
        return Err(format!("responses directory not found: {}", args.responses.display()).into());
    }

    let mut proposer = ReplayProposer::new(&args.responses);
    let options = CycleOptions {
        dry_run: args.dry_run,
        today: None,
    };
    let outcome = run_cycle_with(config, args.model, &request, &mut proposer, options)?;

    for report in &outcome.reports {
        println!(
            "{:<16}+{:<4}-{:<4}dropped {}{}",
            report.kind.collection_name(),
            report.added,
            report.removed,
            report.dropped,
            if report.coerced { " (coerced)" } else { "" }
        );
    }

    let parent = outcome
        .parent
        .as_ref()
        .map(SnapshotRef::dir_name)
        .unwrap_or_else(|| "none".to_string());
    match &outcome.snapshot {
        Some(snapshot) => println!("snapshot {} (parent {})", snapshot.dir_name(), parent),
        None => println!("dry run, nothing written (baseline {})", parent),
    }
    Ok(())
}
