//! Latest command
//!
//! Usage: modelver latest <MODEL>

use clap::Args;
use modelver_core::ModelKind;
use modelver_store::find_latest;
use modelver_store::StoreConfig;

#[derive(Debug, Args)]
pub struct LatestArgs {
    /// class, usecase or sequence
    pub model: ModelKind,
}

pub fn execute(args: LatestArgs, config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    match find_latest(config, args.model)? {
        Some(snapshot) => println!("{}\t{}", snapshot.dir_name(), snapshot.path.display()),
        None => println!("no {} snapshots", args.model),
    }
    Ok(())
}
