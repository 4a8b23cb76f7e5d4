//! Control-block validation for sequence flows
//!
//! A flow is an ordered list of lines forming nested `alt`/`loop`/`opt`
//! blocks closed by `end`, with `else` markers inside open blocks and
//! message lines as leaves. Validation is a single pass over the lines
//! with a stack of open blocks. Unbalanced nesting is the one condition in
//! the merge pipeline that is reported as an error rather than degraded.

use crate::errors::{ModelError, Result};
use crate::model::Element;
use std::fmt;

/// Indentation emitted per open block
pub const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Alt,
    Loop,
    Opt,
}

impl BlockKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            BlockKind::Alt => "alt",
            BlockKind::Loop => "loop",
            BlockKind::Opt => "opt",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Classification of a single flow line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowLine {
    Open(BlockKind),
    Else,
    End,
    Leaf,
    Blank,
}

impl FlowLine {
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return FlowLine::Blank;
        }
        let keyword = trimmed.split_whitespace().next().unwrap_or("");
        match keyword {
            "alt" => FlowLine::Open(BlockKind::Alt),
            "loop" => FlowLine::Open(BlockKind::Loop),
            "opt" => FlowLine::Open(BlockKind::Opt),
            "else" => FlowLine::Else,
            "end" if trimmed == "end" => FlowLine::End,
            _ => FlowLine::Leaf,
        }
    }
}

/// Validate block nesting and return the lines indented by depth
///
/// Line numbers in errors are 1-based positions in `lines`. Blank lines are
/// skipped but still counted.
///
/// # Errors
///
/// - `FlowExtraEnd` when an `end` has no open block
/// - `FlowElseOutsideBlock` when an `else` has no open block
/// - `FlowMissingEnd` when input ends with a block still open; `line` is the
///   last input line and `opened_at` the innermost unclosed opener
pub fn validate<S: AsRef<str>>(lines: &[S]) -> Result<Vec<String>> {
    let mut stack: Vec<(BlockKind, usize)> = Vec::new();
    let mut rendered = Vec::with_capacity(lines.len());

    for (idx, raw) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let text = raw.as_ref().trim();
        match FlowLine::classify(text) {
            FlowLine::Blank => continue,
            FlowLine::Open(kind) => {
                rendered.push(indent(stack.len(), text));
                stack.push((kind, line_no));
            }
            FlowLine::Else => {
                if stack.is_empty() {
                    return Err(ModelError::FlowElseOutsideBlock { line: line_no });
                }
                rendered.push(indent(stack.len() - 1, text));
            }
            FlowLine::End => {
                if stack.pop().is_none() {
                    return Err(ModelError::FlowExtraEnd { line: line_no });
                }
                rendered.push(indent(stack.len(), text));
            }
            FlowLine::Leaf => rendered.push(indent(stack.len(), text)),
        }
    }

    if let Some((kind, opened_at)) = stack.last() {
        return Err(ModelError::FlowMissingEnd {
            line: lines.len(),
            opened_at: *opened_at,
            block: kind.to_string(),
        });
    }

    Ok(rendered)
}

/// Validate a flow held as elements
///
/// # Errors
///
/// Same as [`validate`].
pub fn validate_elements(lines: &[Element]) -> Result<Vec<String>> {
    let texts: Vec<&str> = lines.iter().map(Element::as_str).collect();
    validate(&texts)
}

fn indent(depth: usize, text: &str) -> String {
    format!("{}{}", INDENT.repeat(depth), text)
}
