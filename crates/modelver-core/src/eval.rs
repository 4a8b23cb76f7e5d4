//! Evaluation of a generated model against a reference model
//!
//! Scores are ratios in `[0, 1]` over the generated side: a generated
//! collection with no elements scores 0.

use crate::errors::{ModelError, Result};
use crate::grammar::relationship_parts;
use crate::model::{Element, ElementKind, ModelContents, ModelKind};
use serde::Serialize;
use std::collections::BTreeSet;

/// Score of one collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindScore {
    pub kind: ElementKind,
    pub generated: usize,
    pub correct: usize,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalReport {
    pub model: ModelKind,
    pub scores: Vec<KindScore>,
    /// Use-case models only: share of relationships whose ends are known
    pub logical_consistency: Option<f64>,
}

impl EvalReport {
    pub fn score(&self, kind: ElementKind) -> Option<f64> {
        self.scores.iter().find(|s| s.kind == kind).map(|s| s.score)
    }
}

fn ratio(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}

/// `|generated ∩ reference| / |generated|`
pub fn precision(generated: &BTreeSet<Element>, reference: &BTreeSet<Element>) -> f64 {
    ratio(set_matches(generated, reference), generated.len())
}

/// Share of generated flow positions holding the reference line
pub fn flow_accuracy(generated: &[Element], reference: &[Element]) -> f64 {
    ratio(positional_matches(generated, reference), generated.len())
}

fn set_matches(generated: &BTreeSet<Element>, reference: &BTreeSet<Element>) -> usize {
    generated.intersection(reference).count()
}

fn positional_matches(generated: &[Element], reference: &[Element]) -> usize {
    generated
        .iter()
        .zip(reference)
        .filter(|(g, r)| g == r)
        .count()
}

/// Share of relationships whose subject and object are known actors or use cases
pub fn relationship_consistency(
    relationships: &BTreeSet<Element>,
    actors: &BTreeSet<Element>,
    use_cases: &BTreeSet<Element>,
) -> f64 {
    let known = |name: &str| actors.contains(name) || use_cases.contains(name);
    let valid = relationships
        .iter()
        .filter_map(relationship_parts)
        .filter(|&(subject, object)| known(subject) && known(object))
        .count();
    ratio(valid, relationships.len())
}

/// Score every collection of `generated` against `reference`
///
/// # Errors
///
/// `ModelKindMismatch` when the two contents belong to different model kinds.
pub fn evaluate(generated: &ModelContents, reference: &ModelContents) -> Result<EvalReport> {
    if generated.model() != reference.model() {
        return Err(ModelError::ModelKindMismatch {
            left: generated.model().to_string(),
            right: reference.model().to_string(),
        });
    }
    let model = generated.model();

    let scores = model
        .element_kinds()
        .iter()
        .map(|kind| {
            let (gen_count, correct, score) = if kind.is_ordered() {
                let (gen, reference) = (generated.flow(), reference.flow());
                (
                    gen.len(),
                    positional_matches(gen, reference),
                    flow_accuracy(gen, reference),
                )
            } else {
                let (gen, reference) = (generated.set(*kind), reference.set(*kind));
                (gen.len(), set_matches(gen, reference), precision(gen, reference))
            };
            KindScore {
                kind: *kind,
                generated: gen_count,
                correct,
                score,
            }
        })
        .collect();

    let logical_consistency = (model == ModelKind::UseCase).then(|| {
        relationship_consistency(
            generated.set(ElementKind::UcRelationship),
            generated.set(ElementKind::Actor),
            generated.set(ElementKind::UseCase),
        )
    });

    Ok(EvalReport {
        model,
        scores,
        logical_consistency,
    })
}
