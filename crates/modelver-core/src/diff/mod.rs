//! Snapshot diff
//!
//! Compares two model contents of the same kind and produces a structured,
//! deterministic per-collection delta plus a human readable summary.
//!
//! ```
//! use modelver_core::diff::{compute_diff, render_human_summary};
//! use modelver_core::{Element, ElementKind, ModelContents, ModelKind};
//!
//! let a = ModelContents::empty(ModelKind::Class);
//! let mut b = a.clone();
//! b.replace(ElementKind::Class, vec![Element::new("Order")]).unwrap();
//!
//! let diff = compute_diff(&a, &b).unwrap();
//! assert_eq!(diff.total_added(), 1);
//! assert!(render_human_summary(&diff).contains("Order"));
//! ```

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compute_diff;
pub use human_summary::render_human_summary;
pub use model::{CollectionDiff, ModelDiff};
