//! Artifact text format
//!
//! Set collections are written as a `# Title` header followed by one
//! `* token` bullet per element, sorted. The sequence flow is written as an
//! indented fenced `sequence` block. Parsing is the inverse and reuses the
//! element grammar, so a hand-edited artifact is canonicalized on load.

use modelver_core::flow;
use modelver_core::grammar::{self, DroppedLine};
use modelver_core::{Element, ElementKind, Result as ModelResult};

const FLOW_FENCE: &str = "```sequence";

/// Render the artifact for one collection
///
/// # Errors
///
/// Flow structure errors when `kind` is the flow and `elements` is unbalanced.
pub fn render(kind: ElementKind, elements: &[Element]) -> ModelResult<String> {
    let mut out = format!("# {}\n\n", kind.title());
    if kind.is_ordered() {
        out.push_str(FLOW_FENCE);
        out.push('\n');
        for line in flow::validate_elements(elements)? {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("```\n");
    } else {
        let mut sorted: Vec<&Element> = elements.iter().collect();
        sorted.sort();
        sorted.dedup();
        for element in sorted {
            out.push_str("* ");
            out.push_str(element.as_str());
            out.push('\n');
        }
    }
    Ok(out)
}

/// Parse an artifact back into elements
///
/// Lines that fail the grammar are returned as dropped; nothing here fails.
pub fn parse(kind: ElementKind, text: &str) -> (Vec<Element>, Vec<DroppedLine>) {
    let lines: Vec<&str> = if kind.is_ordered() {
        flow_block(text)
    } else {
        text.lines()
            .filter_map(|l| l.strip_prefix("* ").or_else(|| l.strip_prefix("- ")))
            .collect()
    };

    let mut elements = Vec::new();
    let mut dropped = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        match grammar::canonicalize(kind, line) {
            Ok(element) => elements.push(element),
            Err(d) => dropped.push(d),
        }
    }
    (elements, dropped)
}

fn flow_block(text: &str) -> Vec<&str> {
    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        if line.trim().eq_ignore_ascii_case(FLOW_FENCE) {
            return lines
                .take_while(|l| !l.trim_start().starts_with("```"))
                .collect();
        }
    }
    Vec::new()
}
