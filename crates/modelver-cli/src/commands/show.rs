//! Show command
//!
//! Usage: modelver show <MODEL> [--id <SNAPSHOT>] [--kind <COLLECTION>]

use clap::Args;
use modelver_core::{ElementKind, ModelKind};
use modelver_store::{artifact, load, StoreConfig};

use super::resolve_snapshot;

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub model: ModelKind,

    /// Snapshot id, bare or prefixed (defaults to the latest)
    #[arg(long)]
    pub id: Option<String>,

    /// Only this collection, e.g. `classes` or `flow`
    #[arg(long)]
    pub kind: Option<ElementKind>,
}

pub fn execute(args: ShowArgs, config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = resolve_snapshot(config, args.model, args.id.as_deref())?;
    let loaded = load(&snapshot)?;

    let kinds: Vec<ElementKind> = match args.kind {
        Some(kind) if kind.model() != args.model => {
            return Err(format!("{} is not a collection of the {} model", kind, args.model).into())
        }
        Some(kind) => vec![kind],
        None => args.model.element_kinds().to_vec(),
    };

    println!("<!-- {} -->", snapshot.dir_name());
    for kind in kinds {
        let text = artifact::render(kind, &loaded.contents.elements(kind))?;
        println!("{}", text);
    }

    if !loaded.dropped.is_empty() {
        eprintln!("warning: {} malformed artifact lines ignored", loaded.dropped.len());
    }
    Ok(())
}
