//! Model vocabulary
//!
//! A model of one [`ModelKind`] is a set of named collections, one per
//! [`ElementKind`], each holding canonical [`Element`] tokens.

pub mod contents;
pub mod element;
pub mod kind;

pub use contents::ModelContents;
pub use element::Element;
pub use kind::{ElementKind, MergeStrategy, ModelKind, ProposalShape};
