//! In-memory contents of one model snapshot

use crate::errors::{ModelError, Result};
use crate::model::{Element, ElementKind, ModelKind};
use std::collections::{BTreeMap, BTreeSet};

static EMPTY_SET: BTreeSet<Element> = BTreeSet::new();

/// All element collections of one model
///
/// Set-valued collections are duplicate-free by construction. The sequence
/// flow is kept as an ordered list because its lines form a program in which
/// repeated lines (`end`, `else`) are meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelContents {
    model: ModelKind,
    sets: BTreeMap<ElementKind, BTreeSet<Element>>,
    flow: Vec<Element>,
}

impl ModelContents {
    /// An empty model: every collection present and empty
    pub fn empty(model: ModelKind) -> Self {
        let sets = model
            .element_kinds()
            .iter()
            .filter(|k| !k.is_ordered())
            .map(|k| (*k, BTreeSet::new()))
            .collect();
        Self {
            model,
            sets,
            flow: Vec::new(),
        }
    }

    pub fn model(&self) -> ModelKind {
        self.model
    }

    /// The set collection for `kind`; empty for ordered or foreign kinds
    pub fn set(&self, kind: ElementKind) -> &BTreeSet<Element> {
        self.sets.get(&kind).unwrap_or(&EMPTY_SET)
    }

    /// The ordered flow lines
    pub fn flow(&self) -> &[Element] {
        &self.flow
    }

    /// Elements of `kind` as a list: sorted for sets, in order for the flow
    pub fn elements(&self, kind: ElementKind) -> Vec<Element> {
        if kind.is_ordered() {
            if kind.model() == self.model {
                self.flow.clone()
            } else {
                Vec::new()
            }
        } else {
            self.set(kind).iter().cloned().collect()
        }
    }

    /// Replace the set collection for `kind`
    ///
    /// # Errors
    ///
    /// `ElementKindMismatch` when `kind` is ordered or belongs to another model.
    pub fn set_collection(&mut self, kind: ElementKind, elements: BTreeSet<Element>) -> Result<()> {
        self.check_kind(kind)?;
        if kind.is_ordered() {
            return Err(self.mismatch(kind));
        }
        self.sets.insert(kind, elements);
        Ok(())
    }

    /// Replace the ordered flow
    ///
    /// # Errors
    ///
    /// `ElementKindMismatch` when this model has no flow collection.
    pub fn set_flow(&mut self, lines: Vec<Element>) -> Result<()> {
        self.check_kind(ElementKind::Flow)?;
        self.flow = lines;
        Ok(())
    }

    /// Replace the collection for `kind` from a list, deduplicating sets
    ///
    /// # Errors
    ///
    /// `ElementKindMismatch` when `kind` belongs to another model.
    pub fn replace(&mut self, kind: ElementKind, elements: Vec<Element>) -> Result<()> {
        if kind.is_ordered() {
            self.set_flow(elements)
        } else {
            self.set_collection(kind, elements.into_iter().collect())
        }
    }

    /// Number of elements in the collection for `kind`
    pub fn len(&self, kind: ElementKind) -> usize {
        if kind.is_ordered() {
            self.flow.len()
        } else {
            self.set(kind).len()
        }
    }

    /// Total number of elements across all collections
    pub fn total_elements(&self) -> usize {
        self.sets.values().map(BTreeSet::len).sum::<usize>() + self.flow.len()
    }

    /// True when every collection is empty
    pub fn is_empty(&self) -> bool {
        self.total_elements() == 0
    }

    fn check_kind(&self, kind: ElementKind) -> Result<()> {
        if kind.model() != self.model {
            return Err(self.mismatch(kind));
        }
        Ok(())
    }

    fn mismatch(&self, kind: ElementKind) -> ModelError {
        ModelError::ElementKindMismatch {
            model_kind: self.model.to_string(),
            element_kind: kind.to_string(),
        }
    }
}
