//! Merge algorithms
//!
//! Each element kind folds a normalized [`Proposal`] into its baseline with
//! the strategy named by [`ElementKind::merge_strategy`]:
//!
//! - plain-set: `(baseline ∪ added) − deleted`, then explicit modify pairs
//! - keyed: a signature-key map seeded from the baseline and overlaid by the proposal
//! - ordered (sequence flow): replaced wholesale when non-empty, then validated
//!
//! Deletes of absent elements are no-ops for every kind. An empty proposal
//! never changes a baseline.

use crate::errors::Result;
use crate::flow;
use crate::grammar::signature_key;
use crate::model::{Element, ElementKind, MergeStrategy, ProposalShape};
use crate::normalize::{ChangeSet, Proposal};
use std::collections::{BTreeMap, BTreeSet};

/// Result of merging one element kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Merged elements: sorted for sets, in order for the flow
    pub elements: Vec<Element>,
    pub added: usize,
    pub removed: usize,
    /// The proposal shape differed from what the kind expects
    pub coerced: bool,
}

/// `(baseline ∪ added) − deleted`, then the modify pairs
///
/// A pair applies when its old value was present before the subtract step,
/// so a modify wins over a coincident delete of the same value. Pairs whose
/// old value never existed are ignored.
pub fn plain_set_merge(baseline: &BTreeSet<Element>, changes: &ChangeSet) -> BTreeSet<Element> {
    let combined: BTreeSet<Element> = baseline.union(&changes.added).cloned().collect();
    let mut result = combined.clone();
    result.retain(|e| !changes.deleted.contains(e));
    for (old, new) in &changes.modified {
        if combined.contains(old) {
            result.remove(old);
            result.insert(new.clone());
        }
    }
    result
}

/// Keyed merge: overlay added, drop deleted keys, then apply modify pairs
///
/// The result never holds two elements with the same signature key. Modify
/// pairs follow the plain-set rule: a pair applies when its old key was
/// present before the delete step, otherwise it is ignored.
pub fn keyed_merge(
    kind: ElementKind,
    baseline: &BTreeSet<Element>,
    changes: &ChangeSet,
) -> BTreeSet<Element> {
    let mut map = key_map(kind, baseline);
    for element in &changes.added {
        map.insert(key_of(kind, element), element.clone());
    }
    let present: BTreeSet<_> = map.keys().cloned().collect();
    for element in &changes.deleted {
        map.remove(&key_of(kind, element));
    }
    for (old, new) in &changes.modified {
        let old_key = key_of(kind, old);
        if present.contains(&old_key) {
            map.remove(&old_key);
            map.insert(key_of(kind, new), new.clone());
        }
    }
    map.into_values().collect()
}

/// Keyed merge of a complete final list
///
/// Entries of the list replace baseline entries sharing their key; baseline
/// keys that the list no longer mentions are removed.
pub fn keyed_replace(
    kind: ElementKind,
    baseline: &BTreeSet<Element>,
    target: &[Element],
) -> BTreeSet<Element> {
    let mut map = key_map(kind, baseline);
    let target_map = key_map(kind, target);
    map.retain(|key, _| target_map.contains_key(key));
    map.extend(target_map);
    map.into_values().collect()
}

/// Merge `proposal` into the `baseline` collection of `kind`
///
/// # Errors
///
/// Flow structure errors when `kind` is the sequence flow and the proposed
/// lines are not balanced. Set kinds never fail.
pub fn merge(kind: ElementKind, baseline: &[Element], proposal: &Proposal) -> Result<MergeOutcome> {
    let coerced = proposal.shape() != kind.expected_shape();
    if coerced {
        match kind.expected_shape() {
            ProposalShape::Delta => tracing::warn!(
                kind = %kind,
                "expected add/delete/modify sections, got a flat list; treating it as the final state"
            ),
            ProposalShape::Replacement => tracing::debug!(
                kind = %kind,
                "expected a flat list, got sections; applying them as a delta"
            ),
        }
    }

    if kind.merge_strategy() == MergeStrategy::Ordered {
        return merge_flow(baseline, proposal, coerced);
    }

    let base: BTreeSet<Element> = baseline.iter().cloned().collect();
    let merged = match (kind.merge_strategy(), proposal) {
        (_, p) if p.is_empty() => base.clone(),
        (MergeStrategy::Keyed, Proposal::Delta(changes)) => keyed_merge(kind, &base, changes),
        (MergeStrategy::Keyed, Proposal::Replacement(list)) => keyed_replace(kind, &base, list),
        (_, Proposal::Delta(changes)) => plain_set_merge(&base, changes),
        (_, Proposal::Replacement(list)) => {
            plain_set_merge(&base, &ChangeSet::from_replacement(&base, list))
        }
    };

    Ok(MergeOutcome {
        added: merged.difference(&base).count(),
        removed: base.difference(&merged).count(),
        elements: merged.into_iter().collect(),
        coerced,
    })
}

fn merge_flow(baseline: &[Element], proposal: &Proposal, coerced: bool) -> Result<MergeOutcome> {
    let lines = match proposal {
        Proposal::Replacement(list) if !list.is_empty() => list.clone(),
        Proposal::Replacement(_) => baseline.to_vec(),
        Proposal::Delta(_) => {
            tracing::warn!("sectioned proposal for an ordered flow ignored");
            baseline.to_vec()
        }
    };
    flow::validate_elements(&lines)?;

    let replaced = lines.as_slice() != baseline;
    Ok(MergeOutcome {
        added: if replaced { lines.len() } else { 0 },
        removed: if replaced { baseline.len() } else { 0 },
        elements: lines,
        coerced,
    })
}

fn key_of(kind: ElementKind, element: &Element) -> String {
    signature_key(kind, element).unwrap_or_else(|| element.as_str().to_string())
}

fn key_map<'a, I>(kind: ElementKind, elements: I) -> BTreeMap<String, Element>
where
    I: IntoIterator<Item = &'a Element>,
{
    elements
        .into_iter()
        .map(|e| (key_of(kind, e), e.clone()))
        .collect()
}
