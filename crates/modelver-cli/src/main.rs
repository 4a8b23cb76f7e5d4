//! modelver CLI
//!
//! Command-line interface for versioned class, use-case and sequence models

use clap::{Parser, Subcommand};
use modelver_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "modelver")]
#[command(about = "modelver - versioned structural models and change merging", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: commands::StoreArgs,

    /// Log profile written to stderr: dev, prod or off
    #[arg(long, global = true, default_value = "off")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the latest snapshot of a model
    Latest(commands::latest::LatestArgs),
    /// Print the collections of a snapshot
    Show(commands::show::ShowArgs),
    /// Walk the parent chain of a snapshot
    History(commands::history::HistoryArgs),
    /// Compare two snapshots
    Diff(commands::diff::DiffArgs),
    /// Score a snapshot against a reference model
    Eval(commands::eval::EvalArgs),
    /// Run a change cycle from recorded collaborator responses
    Apply(commands::apply::ApplyArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.log != "off" {
        let profile = Profile::parse(&cli.log)
            .ok_or_else(|| format!("unknown log profile '{}'", cli.log))?;
        init(profile);
    }

    let config = cli.store.resolve()?;

    match cli.command {
        Commands::Latest(args) => commands::latest::execute(args, &config),
        Commands::Show(args) => commands::show::execute(args, &config),
        Commands::History(args) => commands::history::execute(args, &config),
        Commands::Diff(args) => commands::diff::execute(args, &config),
        Commands::Eval(args) => commands::eval::execute(args, &config),
        Commands::Apply(args) => commands::apply::execute(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
