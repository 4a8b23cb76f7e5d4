//! modelver core - versioned structural models and the change-merge engine
//!
//! This crate provides the pure (I/O free) half of modelver:
//! - Model vocabulary: model kinds, element kinds and canonical elements
//! - Per-kind line grammars with canonicalization
//! - Normalization of free-form collaborator output into change proposals
//! - Plain-set and keyed merge algorithms
//! - Control-block validation for sequence flows
//! - Snapshot diffs and evaluation metrics
//!
//! Persistence lives in `modelver-store`, cycle orchestration in `modelver-engine`.

pub mod diff;
pub mod errors;
pub mod eval;
pub mod flow;
pub mod grammar;
pub mod logging_facility;
pub mod merge;
pub mod model;
pub mod normalize;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, ModelError, Result};
pub use model::{Element, ElementKind, MergeStrategy, ModelContents, ModelKind, ProposalShape};
pub use normalize::{normalize, ChangeSet, Normalized, Proposal};
