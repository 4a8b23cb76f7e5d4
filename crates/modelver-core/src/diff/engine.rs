//! Snapshot diff computation.

use crate::diff::model::{CollectionDiff, ModelDiff};
use crate::errors::{ModelError, Result};
use crate::model::{Element, ModelContents};
use std::collections::BTreeSet;

/// Compute a set-delta between two element lists.
///
/// Returns `(added, removed)` where added = in b but not a, removed = in a
/// but not b. Input order is preserved and repeats are reported once.
fn set_delta(a: &[Element], b: &[Element]) -> (Vec<Element>, Vec<Element>) {
    let set_a: BTreeSet<&Element> = a.iter().collect();
    let set_b: BTreeSet<&Element> = b.iter().collect();
    let mut seen = BTreeSet::new();
    let added = b
        .iter()
        .filter(|e| !set_a.contains(e) && seen.insert(*e))
        .cloned()
        .collect();
    seen.clear();
    let removed = a
        .iter()
        .filter(|e| !set_b.contains(e) && seen.insert(*e))
        .cloned()
        .collect();
    (added, removed)
}

/// Compute the diff from `older` to `newer`.
///
/// # Errors
///
/// `ModelKindMismatch` when the two contents belong to different model kinds.
pub fn compute_diff(older: &ModelContents, newer: &ModelContents) -> Result<ModelDiff> {
    if older.model() != newer.model() {
        return Err(ModelError::ModelKindMismatch {
            left: older.model().to_string(),
            right: newer.model().to_string(),
        });
    }

    let model = older.model();
    let collections = model
        .element_kinds()
        .iter()
        .map(|kind| {
            let (added, removed) = set_delta(&older.elements(*kind), &newer.elements(*kind));
            CollectionDiff {
                kind: *kind,
                added,
                removed,
            }
        })
        .collect();

    Ok(ModelDiff {
        model,
        collections,
        flow_changed: older.flow() != newer.flow(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, ModelKind};

    fn el(s: &str) -> Element {
        Element::new(s)
    }

    #[test]
    fn test_set_delta_preserves_order_and_dedups() {
        let (added, removed) = set_delta(
            &[el("end"), el("A->B: x"), el("end")],
            &[el("B->A: y"), el("end"), el("B->A: y")],
        );
        assert_eq!(added, vec![el("B->A: y")]);
        assert_eq!(removed, vec![el("A->B: x")]);
    }

    #[test]
    fn test_reordered_flow_is_changed_without_set_delta() {
        let mut a = ModelContents::empty(ModelKind::Sequence);
        a.set_flow(vec![el("A->B: x"), el("B->A: y")]).unwrap();
        let mut b = a.clone();
        b.set_flow(vec![el("B->A: y"), el("A->B: x")]).unwrap();

        let diff = compute_diff(&a, &b).unwrap();
        assert!(diff.flow_changed);
        assert!(diff.collection(ElementKind::Flow).unwrap().is_empty());
        assert!(!diff.is_identical());
    }

    #[test]
    fn test_mismatched_models_rejected() {
        let a = ModelContents::empty(ModelKind::Class);
        let b = ModelContents::empty(ModelKind::UseCase);
        assert!(matches!(
            compute_diff(&a, &b),
            Err(ModelError::ModelKindMismatch { .. })
        ));
    }
}
