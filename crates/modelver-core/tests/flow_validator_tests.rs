#![allow(clippy::unwrap_used, clippy::expect_used)]

use modelver_core::errors::ModelError;
use modelver_core::flow::validate;
use proptest::prelude::*;

#[test]
fn test_scenario_balanced_alt() {
    assert!(validate(&["alt c1", "A->B:m", "end"]).is_ok());
}

#[test]
fn test_scenario_unterminated_alt_cites_line_2() {
    let err = validate(&["alt c1", "A->B:m"]).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(matches!(err, ModelError::FlowMissingEnd { opened_at: 1, .. }));
}

#[test]
fn test_first_violation_is_reported() {
    let err = validate(&["end", "end"]).unwrap_err();
    assert_eq!(err, ModelError::FlowExtraEnd { line: 1 });
}

#[test]
fn test_blank_lines_counted_but_skipped() {
    let out = validate(&["opt x", "", "A->B: y", "end"]).unwrap();
    assert_eq!(out, vec!["opt x", "  A->B: y", "end"]);

    let err = validate(&["", "", "end"]).unwrap_err();
    assert_eq!(err.line(), Some(3));
}

#[test]
fn test_innermost_unclosed_opener_is_cited() {
    let err = validate(&["loop a", "alt b", "end", "opt c", "X->Y: z"]).unwrap_err();
    assert_eq!(
        err,
        ModelError::FlowMissingEnd {
            line: 5,
            opened_at: 4,
            block: "opt".to_string()
        }
    );
}

#[derive(Debug, Clone)]
enum Tree {
    Leaf,
    Block(&'static str, Vec<Tree>, bool),
}

fn tree() -> impl Strategy<Value = Tree> {
    let leaf = Just(Tree::Leaf);
    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            prop::sample::select(vec!["alt", "loop", "opt"]),
            prop::collection::vec(inner, 0..4),
            any::<bool>(),
        )
            .prop_map(|(kw, children, with_else)| Tree::Block(kw, children, with_else))
    })
}

fn emit(tree: &Tree, out: &mut Vec<String>) {
    match tree {
        Tree::Leaf => out.push("A->B: msg".to_string()),
        Tree::Block(kw, children, with_else) => {
            out.push(format!("{} cond", kw));
            for (i, child) in children.iter().enumerate() {
                if *with_else && i == children.len() / 2 {
                    out.push("else".to_string());
                }
                emit(child, out);
            }
            out.push("end".to_string());
        }
    }
}

proptest! {
    #[test]
    fn balanced_nesting_is_accepted(trees in prop::collection::vec(tree(), 0..5)) {
        let mut lines = Vec::new();
        for t in &trees {
            emit(t, &mut lines);
        }
        let rendered = validate(&lines).unwrap();
        prop_assert_eq!(rendered.len(), lines.len());
    }

    #[test]
    fn removing_an_end_is_rejected(trees in prop::collection::vec(tree(), 1..5), pick in any::<prop::sample::Index>()) {
        let mut lines = Vec::new();
        for t in &trees {
            emit(t, &mut lines);
        }
        let ends: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.as_str() == "end")
            .map(|(i, _)| i)
            .collect();
        prop_assume!(!ends.is_empty());
        lines.remove(ends[pick.index(ends.len())]);
        prop_assert!(validate(&lines).is_err());
    }
}
