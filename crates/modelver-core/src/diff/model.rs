//! Snapshot diff output types.
//!
//! Element lists are sorted for set collections and kept in input order for
//! the flow, so serialized diffs are deterministic.

use crate::model::{Element, ElementKind, ModelKind};
use serde::{Deserialize, Serialize};

/// Delta of one element collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionDiff {
    pub kind: ElementKind,
    /// Present in the newer side only
    pub added: Vec<Element>,
    /// Present in the older side only
    pub removed: Vec<Element>,
}

impl CollectionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Structured diff between two snapshots of one model
///
/// Every collection of the model is listed, including unchanged ones, so
/// consumers can iterate uniformly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelDiff {
    pub model: ModelKind,
    pub collections: Vec<CollectionDiff>,
    /// The flow differs in content or order (sequence models only)
    pub flow_changed: bool,
}

impl ModelDiff {
    pub fn is_identical(&self) -> bool {
        !self.flow_changed && self.collections.iter().all(CollectionDiff::is_empty)
    }

    pub fn total_added(&self) -> usize {
        self.collections.iter().map(|c| c.added.len()).sum()
    }

    pub fn total_removed(&self) -> usize {
        self.collections.iter().map(|c| c.removed.len()).sum()
    }

    pub fn collection(&self, kind: ElementKind) -> Option<&CollectionDiff> {
        self.collections.iter().find(|c| c.kind == kind)
    }
}
