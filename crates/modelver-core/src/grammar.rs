//! Per-kind line grammars and canonicalization
//!
//! Every element that enters a model passes through [`canonicalize`], which
//! strips incidental formatting (list bullets, spacing around separators,
//! synonym spellings) and either returns the canonical [`Element`] or a
//! [`DroppedLine`] explaining why the line was rejected. Rejection is a
//! value, never a panic or an error: collaborators are noisy and a bad line
//! only costs that line.
//!
//! Keyed kinds (relations, messages) additionally expose a
//! [`signature_key`]: the endpoint pair that identifies "the same item"
//! across two different values.

use crate::model::{Element, ElementKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*+•]|\d+[.)])\s+").expect("valid bullet regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static IDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+$").expect("valid ident regex"));
static ATTRIBUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s*\.\s*(\w+)$").expect("valid attribute regex"));
static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+)\s*\.\s*(\w+)\s*(?:\(([^()]*)\))?$").expect("valid method regex")
});
static PARAM_COLON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*:\s*").expect("valid param regex"));
static RELATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+)\s*<\s*:?\s*([A-Za-z_]+)\s*:?\s*>\s*(\w+)$").expect("valid relation regex")
});
static MESSAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+)\s*(-->|->>|->)\s*(\w+)\s*:\s*(.*\S)\s*$").expect("valid message regex")
});
static OBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+)\s*:\s*(\w+)(?:\s*#\s*(.*\S))?\s*$").expect("valid object regex")
});
static UC_RELATIONSHIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*->\s*(.+)$").expect("valid relationship regex"));
static NAME_NOISE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[【】「」()<>\[\]]").expect("valid name noise regex"));
static BLOCK_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(alt|loop|opt)(?:\s+(.*\S))?$").expect("valid block regex"));
static ELSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^else(?:\s+(.*\S))?$").expect("valid else regex"));

/// Why a line was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// Nothing left after stripping decoration
    Empty,
    /// The line does not match the kind's pattern
    PatternMismatch,
    /// A relation whose type token has no canonical equivalent
    UnknownRelationType(String),
    /// A sectioned block line that precedes every section label
    OutsideSection,
    /// A modification line without a valid `old => new` pair
    MalformedPair,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::Empty => f.write_str("empty line"),
            DropReason::PatternMismatch => f.write_str("does not match the element pattern"),
            DropReason::UnknownRelationType(t) => write!(f, "unknown relation type '{}'", t),
            DropReason::OutsideSection => f.write_str("outside any add/delete/modify section"),
            DropReason::MalformedPair => f.write_str("modification is not a valid 'old => new' pair"),
        }
    }
}

/// A proposal or artifact line that did not survive canonicalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedLine {
    pub kind: ElementKind,
    pub line: String,
    pub reason: DropReason,
}

impl DroppedLine {
    pub fn new(kind: ElementKind, line: &str, reason: DropReason) -> Self {
        Self {
            kind,
            line: line.to_string(),
            reason,
        }
    }
}

/// Remove list bullets, emphasis markers and zero-width characters
pub fn strip_decoration(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '\u{200B}' | '\u{FEFF}'))
        .collect();
    let trimmed = cleaned.trim();
    let unbulleted = BULLET_RE.replace(trimmed, "");
    unbulleted
        .trim()
        .trim_matches(|c| c == '`' || c == '*')
        .trim()
        .replace('→', "->")
}

/// Map a relation type spelling to its canonical token
pub fn canonical_relation_type(token: &str) -> Option<&'static str> {
    match token.trim().to_ascii_lowercase().as_str() {
        "extends" | "extend" | "inheritance" | "inherits" | "inherit" | "generalization" => {
            Some("extends")
        }
        "composition" | "composite" | "compose" => Some("composition"),
        "aggregation" | "aggregate" => Some("aggregation"),
        "association" | "associate" | "associated" | "correlation" => Some("association"),
        "dependency" | "depends" | "depend" | "uses" => Some("dependency"),
        _ => None,
    }
}

/// Validate and canonicalize one line for `kind`
///
/// # Errors
///
/// Returns the [`DroppedLine`] when the line is empty or fails the kind's
/// pattern. Callers are expected to record and skip it.
pub fn canonicalize(kind: ElementKind, raw: &str) -> Result<Element, DroppedLine> {
    let line = strip_decoration(raw);
    if line.is_empty() {
        return Err(DroppedLine::new(kind, raw, DropReason::Empty));
    }
    let mismatch = || DroppedLine::new(kind, raw, DropReason::PatternMismatch);

    let token = match kind {
        ElementKind::Class => {
            if !IDENT_RE.is_match(&line) {
                return Err(mismatch());
            }
            line
        }
        ElementKind::Attribute => {
            let caps = ATTRIBUTE_RE.captures(&line).ok_or_else(mismatch)?;
            format!("{}.{}", &caps[1], &caps[2])
        }
        ElementKind::Method => {
            let caps = METHOD_RE.captures(&line).ok_or_else(mismatch)?;
            match caps.get(3) {
                Some(params) => format!(
                    "{}.{}({})",
                    &caps[1],
                    &caps[2],
                    canonical_params(params.as_str())
                ),
                None => format!("{}.{}", &caps[1], &caps[2]),
            }
        }
        ElementKind::Relation => {
            let caps = RELATION_RE.captures(&line).ok_or_else(mismatch)?;
            let rel_type = canonical_relation_type(&caps[2]).ok_or_else(|| {
                DroppedLine::new(
                    kind,
                    raw,
                    DropReason::UnknownRelationType(caps[2].to_string()),
                )
            })?;
            format!("{}<:{}:>{}", &caps[1], rel_type, &caps[3])
        }
        ElementKind::Actor | ElementKind::UseCase => canonical_name(&line).ok_or_else(mismatch)?,
        ElementKind::UcRelationship => {
            let caps = UC_RELATIONSHIP_RE.captures(&line).ok_or_else(mismatch)?;
            let subject = canonical_name(&caps[1]).ok_or_else(mismatch)?;
            let object = canonical_name(&caps[2]).ok_or_else(mismatch)?;
            format!("{}->{}", subject, object)
        }
        ElementKind::Object => {
            let caps = OBJECT_RE.captures(&line).ok_or_else(mismatch)?;
            match caps.get(3) {
                Some(note) => format!("{}:{} #{}", &caps[1], &caps[2], note.as_str()),
                None => format!("{}:{}", &caps[1], &caps[2]),
            }
        }
        ElementKind::Message => canonical_message(&line).ok_or_else(mismatch)?,
        ElementKind::Flow => canonical_flow_line(&line).ok_or_else(mismatch)?,
    };

    Ok(Element::new(token))
}

/// Stable sub-part of an element used for keyed merging
///
/// `Some("A->B")` for relations and messages (the arrow of a message is
/// part of its key), `None` for kinds identified by their whole token.
pub fn signature_key(kind: ElementKind, element: &Element) -> Option<String> {
    match kind {
        ElementKind::Relation => relation_parts(element).map(|(a, _, b)| format!("{}->{}", a, b)),
        ElementKind::Message => element
            .as_str()
            .split_once(':')
            .map(|(lhs, _)| lhs.trim().to_string()),
        _ => None,
    }
}

/// Split a canonical relation into `(source, type, target)`
pub fn relation_parts(element: &Element) -> Option<(&str, &str, &str)> {
    let (source, rest) = element.as_str().split_once("<:")?;
    let (rel_type, target) = rest.split_once(":>")?;
    Some((source, rel_type, target))
}

/// Split a canonical use-case relationship into `(subject, object)`
pub fn relationship_parts(element: &Element) -> Option<(&str, &str)> {
    element.as_str().split_once("->")
}

fn canonical_params(params: &str) -> String {
    params
        .split(',')
        .map(|p| PARAM_COLON_RE.replace_all(p.trim(), ": ").into_owned())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn canonical_name(raw: &str) -> Option<String> {
    let cleaned = NAME_NOISE_RE.replace_all(raw, "");
    let collapsed = WHITESPACE_RE.replace_all(cleaned.trim(), " ").into_owned();
    if collapsed.is_empty()
        || collapsed.contains("->")
        || collapsed.contains("<:")
        || collapsed.ends_with(':')
        || collapsed.starts_with("```")
    {
        return None;
    }
    Some(collapsed)
}

fn canonical_message(line: &str) -> Option<String> {
    let caps = MESSAGE_RE.captures(line)?;
    let content = WHITESPACE_RE.replace_all(&caps[4], " ");
    Some(format!("{}{}{}: {}", &caps[1], &caps[2], &caps[3], content))
}

fn canonical_flow_line(line: &str) -> Option<String> {
    if let Some(caps) = BLOCK_OPEN_RE.captures(line) {
        return Some(match caps.get(2) {
            Some(cond) => format!("{} {}", &caps[1], cond.as_str()),
            None => caps[1].to_string(),
        });
    }
    if let Some(caps) = ELSE_RE.captures(line) {
        return Some(match caps.get(1) {
            Some(cond) => format!("else {}", cond.as_str()),
            None => "else".to_string(),
        });
    }
    if line == "end" {
        return Some(line.to_string());
    }
    canonical_message(line)
}
