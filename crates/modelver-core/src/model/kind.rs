//! Model kinds and element kinds
//!
//! Each model kind owns a fixed, dependency-ordered list of element kinds.
//! A change cycle visits them in that order so that later kinds can be
//! proposed with the finalized results of earlier ones as context.

use crate::errors::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three diagram families that are versioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Class,
    UseCase,
    Sequence,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Class, ModelKind::UseCase, ModelKind::Sequence];

    /// Stable prefix used in snapshot directory names and logs
    pub fn prefix(&self) -> &'static str {
        match self {
            ModelKind::Class => "class",
            ModelKind::UseCase => "usecase",
            ModelKind::Sequence => "sequence",
        }
    }

    /// Human readable title
    pub fn title(&self) -> &'static str {
        match self {
            ModelKind::Class => "Class Model",
            ModelKind::UseCase => "Use Case Model",
            ModelKind::Sequence => "Sequence Model",
        }
    }

    /// Element kinds of this model in dependency order
    pub fn element_kinds(&self) -> &'static [ElementKind] {
        match self {
            ModelKind::Class => &[
                ElementKind::Class,
                ElementKind::Attribute,
                ElementKind::Method,
                ElementKind::Relation,
            ],
            ModelKind::UseCase => &[
                ElementKind::Actor,
                ElementKind::UseCase,
                ElementKind::UcRelationship,
            ],
            ModelKind::Sequence => &[
                ElementKind::Object,
                ElementKind::Message,
                ElementKind::Flow,
            ],
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for ModelKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "class" | "classes" => Ok(ModelKind::Class),
            "usecase" | "use_case" | "use-case" | "usecases" => Ok(ModelKind::UseCase),
            "sequence" | "seq" => Ok(ModelKind::Sequence),
            _ => Err(ModelError::UnknownModelKind {
                value: s.to_string(),
            }),
        }
    }
}

/// How a proposal for an element kind is folded into its baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// `(baseline ∪ added) − deleted`, then explicit modify pairs
    PlainSet,
    /// Replace by signature key; add and modify collapse into one overlay
    Keyed,
    /// Ordered lines replaced wholesale when the proposal is non-empty
    Ordered,
}

/// The proposal form a collaborator is asked to produce for an element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalShape {
    /// Explicit add/delete/modify sections
    Delta,
    /// The complete final list
    Replacement,
}

/// One named collection within a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Class,
    Attribute,
    Method,
    Relation,
    Actor,
    UseCase,
    UcRelationship,
    Object,
    Message,
    Flow,
}

impl ElementKind {
    pub const ALL: [ElementKind; 10] = [
        ElementKind::Class,
        ElementKind::Attribute,
        ElementKind::Method,
        ElementKind::Relation,
        ElementKind::Actor,
        ElementKind::UseCase,
        ElementKind::UcRelationship,
        ElementKind::Object,
        ElementKind::Message,
        ElementKind::Flow,
    ];

    /// The model this element kind belongs to
    pub fn model(&self) -> ModelKind {
        match self {
            ElementKind::Class
            | ElementKind::Attribute
            | ElementKind::Method
            | ElementKind::Relation => ModelKind::Class,
            ElementKind::Actor | ElementKind::UseCase | ElementKind::UcRelationship => {
                ModelKind::UseCase
            }
            ElementKind::Object | ElementKind::Message | ElementKind::Flow => ModelKind::Sequence,
        }
    }

    /// Collection name, also the stem of the artifact file
    pub fn collection_name(&self) -> &'static str {
        match self {
            ElementKind::Class => "classes",
            ElementKind::Attribute => "attributes",
            ElementKind::Method => "methods",
            ElementKind::Relation => "relations",
            ElementKind::Actor => "actors",
            ElementKind::UseCase => "use_cases",
            ElementKind::UcRelationship => "relationships",
            ElementKind::Object => "objects",
            ElementKind::Message => "messages",
            ElementKind::Flow => "flow",
        }
    }

    /// Artifact file name inside a snapshot directory
    pub fn artifact_file(&self) -> &'static str {
        match self {
            ElementKind::Class => "classes.md",
            ElementKind::Attribute => "attributes.md",
            ElementKind::Method => "methods.md",
            ElementKind::Relation => "relations.md",
            ElementKind::Actor => "actors.md",
            ElementKind::UseCase => "use_cases.md",
            ElementKind::UcRelationship => "relationships.md",
            ElementKind::Object => "objects.md",
            ElementKind::Message => "messages.md",
            ElementKind::Flow => "flow.md",
        }
    }

    /// Heading written at the top of the artifact
    pub fn title(&self) -> &'static str {
        match self {
            ElementKind::Class => "Class List",
            ElementKind::Attribute => "Class Attributes",
            ElementKind::Method => "Class Methods",
            ElementKind::Relation => "Class Relationships",
            ElementKind::Actor => "Actor List",
            ElementKind::UseCase => "Use Case List",
            ElementKind::UcRelationship => "Use Case Relationships",
            ElementKind::Object => "Sequence Diagram Objects",
            ElementKind::Message => "Message List",
            ElementKind::Flow => "Message Flow",
        }
    }

    pub fn merge_strategy(&self) -> MergeStrategy {
        match self {
            ElementKind::Relation | ElementKind::Message => MergeStrategy::Keyed,
            ElementKind::Flow => MergeStrategy::Ordered,
            _ => MergeStrategy::PlainSet,
        }
    }

    pub fn expected_shape(&self) -> ProposalShape {
        match self {
            ElementKind::Class
            | ElementKind::Attribute
            | ElementKind::Method
            | ElementKind::UseCase
            | ElementKind::UcRelationship => ProposalShape::Delta,
            ElementKind::Relation
            | ElementKind::Actor
            | ElementKind::Object
            | ElementKind::Message
            | ElementKind::Flow => ProposalShape::Replacement,
        }
    }

    /// Whether the collection is an ordered sequence rather than a set
    pub fn is_ordered(&self) -> bool {
        matches!(self.merge_strategy(), MergeStrategy::Ordered)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_name())
    }
}

impl FromStr for ElementKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ElementKind::ALL
            .into_iter()
            .find(|kind| {
                kind.collection_name() == wanted
                    || serde_name(*kind) == wanted
                    || kind.artifact_file() == wanted
            })
            .ok_or_else(|| ModelError::UnknownElementKind {
                value: s.to_string(),
            })
    }
}

fn serde_name(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Class => "class",
        ElementKind::Attribute => "attribute",
        ElementKind::Method => "method",
        ElementKind::Relation => "relation",
        ElementKind::Actor => "actor",
        ElementKind::UseCase => "use_case",
        ElementKind::UcRelationship => "uc_relationship",
        ElementKind::Object => "object",
        ElementKind::Message => "message",
        ElementKind::Flow => "flow",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_element_kind_belongs_to_its_model_list() {
        for kind in ElementKind::ALL {
            assert!(kind.model().element_kinds().contains(&kind));
        }
    }

    #[test]
    fn test_dependency_order() {
        assert_eq!(
            ModelKind::Class.element_kinds(),
            &[
                ElementKind::Class,
                ElementKind::Attribute,
                ElementKind::Method,
                ElementKind::Relation
            ]
        );
        assert_eq!(ModelKind::Sequence.element_kinds().last(), Some(&ElementKind::Flow));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("use_cases".parse::<ElementKind>().unwrap(), ElementKind::UseCase);
        assert_eq!("message".parse::<ElementKind>().unwrap(), ElementKind::Message);
        assert_eq!("flow.md".parse::<ElementKind>().unwrap(), ElementKind::Flow);
        assert!("widgets".parse::<ElementKind>().is_err());
        assert_eq!("UseCase".parse::<ModelKind>().unwrap(), ModelKind::UseCase);
        assert!("deployment".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_only_flow_is_ordered() {
        let ordered: Vec<_> = ElementKind::ALL.into_iter().filter(|k| k.is_ordered()).collect();
        assert_eq!(ordered, vec![ElementKind::Flow]);
    }
}
