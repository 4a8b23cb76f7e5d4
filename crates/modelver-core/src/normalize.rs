//! Normalization of collaborator output into a tagged proposal
//!
//! [`normalize`] never fails. It locates the RESULT block (or falls back to
//! the whole text), decides once whether the block is sectioned
//! (add/delete/modify) or a flat list, and canonicalizes every surviving
//! line through the grammar. Rejected lines are returned alongside the
//! proposal so the caller can report them.

use crate::grammar::{self, DropReason, DroppedLine};
use crate::model::{Element, ElementKind, ProposalShape};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static RESULT_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^```\s*result\s*$").expect("valid fence regex"));
static SECTION_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(#+\s*)?\**\s*((?:additions|added|add|new|deletions|deleted|delete|removed|remove|modifications|modified|modify|edited|edit|alter|changed)\b|新增|删除|修改)(.*)$",
    )
    .expect("valid section regex")
});
// words between a label and its colon: `Added classes:`, `新增类：`
static LABEL_QUALIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\s*]{0,40}$").expect("valid qualifier regex"));

/// Separator between the old and new value of a modification pair
pub const MODIFY_SEPARATOR: &str = "=>";

/// Explicit add/delete/modify proposal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: BTreeSet<Element>,
    pub deleted: BTreeSet<Element>,
    pub modified: Vec<(Element, Element)>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }

    /// Derive the change set that turns `baseline` into `target`
    pub fn from_replacement<'a, I>(baseline: &BTreeSet<Element>, target: I) -> Self
    where
        I: IntoIterator<Item = &'a Element>,
    {
        let target: BTreeSet<Element> = target.into_iter().cloned().collect();
        Self {
            added: target.difference(baseline).cloned().collect(),
            deleted: baseline.difference(&target).cloned().collect(),
            modified: Vec::new(),
        }
    }
}

/// A normalized proposal, decided once during normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proposal {
    Delta(ChangeSet),
    /// The collaborator's complete final list, in the order given
    Replacement(Vec<Element>),
}

impl Proposal {
    pub fn shape(&self) -> ProposalShape {
        match self {
            Proposal::Delta(_) => ProposalShape::Delta,
            Proposal::Replacement(_) => ProposalShape::Replacement,
        }
    }

    /// True when merging this proposal cannot change a baseline
    pub fn is_empty(&self) -> bool {
        match self {
            Proposal::Delta(changes) => changes.is_empty(),
            Proposal::Replacement(list) => list.is_empty(),
        }
    }
}

/// Where the normalized lines were read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSource {
    Fenced,
    WholeText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub proposal: Proposal,
    pub dropped: Vec<DroppedLine>,
    pub source: BlockSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Add,
    Delete,
    Modify,
}

impl Section {
    fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "delete" | "deleted" | "remove" | "removed" | "deletions" | "删除" => Section::Delete,
            "modify" | "modified" | "edit" | "edited" | "alter" | "changed" | "modifications"
            | "修改" => Section::Modify,
            _ => Section::Add,
        }
    }
}

/// Lines of the first RESULT block, or of the whole text when there is none
///
/// An unclosed fence runs to the end of the text.
pub fn extract_result_block(raw: &str) -> (Vec<&str>, BlockSource) {
    let mut lines = raw.lines();
    let mut block = Vec::new();
    while let Some(line) = lines.next() {
        if RESULT_FENCE_RE.is_match(line.trim()) {
            for inner in lines.by_ref() {
                if inner.trim_start().starts_with("```") {
                    break;
                }
                block.push(inner);
            }
            return (block, BlockSource::Fenced);
        }
    }
    (raw.lines().collect(), BlockSource::WholeText)
}

/// Normalize raw collaborator text for one element kind
pub fn normalize(raw: &str, kind: ElementKind) -> Normalized {
    let (lines, source) = extract_result_block(raw);
    let mut dropped = Vec::new();

    let sectioned = !kind.is_ordered() && lines.iter().any(|l| section_label(l).is_some());
    let proposal = if sectioned {
        Proposal::Delta(parse_sections(kind, &lines, &mut dropped))
    } else {
        Proposal::Replacement(parse_list(kind, &lines, &mut dropped))
    };

    tracing::debug!(
        kind = %kind,
        shape = ?proposal.shape(),
        source = ?source,
        dropped = dropped.len(),
        "normalized proposal"
    );

    Normalized {
        proposal,
        dropped,
        source,
    }
}

/// A section label line: `Added:`, `Deleted classes:`, `## Modified`, `**修改**: A => B`
///
/// Labels require a colon or a heading marker so that a bare element which
/// happens to spell a label word is not mistaken for one. Text after the
/// colon is an inline item; the rest of a heading without a colon is only
/// a title.
fn section_label(line: &str) -> Option<(Section, &str)> {
    let caps = SECTION_LABEL_RE.captures(line.trim())?;
    let section = Section::from_label(caps.get(2)?.as_str());
    let tail = caps.get(3).map_or("", |m| m.as_str());

    if let Some((qualifier, rest)) = tail.split_once([':', '：']) {
        if LABEL_QUALIFIER_RE.is_match(qualifier) {
            let rest = rest.trim_start_matches(|c: char| c == '*' || c.is_whitespace());
            return Some((section, rest));
        }
    }
    caps.get(1).map(|_| (section, ""))
}

fn is_skippable(line: &str) -> bool {
    let trimmed = grammar::strip_decoration(line);
    trimmed.is_empty()
        || trimmed.starts_with("```")
        || matches!(
            trimmed.to_lowercase().as_str(),
            "none" | "n/a" | "无" | "-" | "empty"
        )
}

fn parse_list(kind: ElementKind, lines: &[&str], dropped: &mut Vec<DroppedLine>) -> Vec<Element> {
    let mut out = Vec::new();
    for line in lines {
        if is_skippable(line) {
            continue;
        }
        match grammar::canonicalize(kind, line) {
            Ok(element) => out.push(element),
            Err(d) => dropped.push(d),
        }
    }
    out
}

fn parse_sections(kind: ElementKind, lines: &[&str], dropped: &mut Vec<DroppedLine>) -> ChangeSet {
    let mut changes = ChangeSet::default();
    let mut current: Option<Section> = None;

    for line in lines {
        let item = match section_label(line) {
            Some((section, rest)) => {
                current = Some(section);
                rest
            }
            None => line,
        };
        if is_skippable(item) {
            continue;
        }
        let Some(section) = current else {
            dropped.push(DroppedLine::new(kind, item, DropReason::OutsideSection));
            continue;
        };

        match section {
            Section::Add => match grammar::canonicalize(kind, item) {
                Ok(element) => {
                    changes.added.insert(element);
                }
                Err(d) => dropped.push(d),
            },
            Section::Delete => match grammar::canonicalize(kind, item) {
                Ok(element) => {
                    changes.deleted.insert(element);
                }
                Err(d) => dropped.push(d),
            },
            Section::Modify => match parse_pair(kind, item) {
                Some(pair) => changes.modified.push(pair),
                None => dropped.push(DroppedLine::new(kind, item, DropReason::MalformedPair)),
            },
        }
    }
    changes
}

fn parse_pair(kind: ElementKind, line: &str) -> Option<(Element, Element)> {
    let (old, new) = line.split_once(MODIFY_SEPARATOR)?;
    let old = grammar::canonicalize(kind, old).ok()?;
    let new = grammar::canonicalize(kind, new).ok()?;
    Some((old, new))
}
