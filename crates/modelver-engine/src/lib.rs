//! modelver engine - change-cycle orchestration
//!
//! Coordinates one change cycle: load the latest snapshot, ask the
//! collaborator for each element kind in dependency order, normalize and
//! merge its answers, then write the merged model as a new snapshot.
//!
//! The collaborator is injected through the [`Proposer`] trait; there is no
//! global registry.

pub mod commands;
pub mod proposer;

pub use commands::cycle::{run_cycle, run_cycle_with, CycleOptions, CycleOutcome, KindReport};
pub use proposer::{ProposalRequest, Proposer, ReplayProposer};
