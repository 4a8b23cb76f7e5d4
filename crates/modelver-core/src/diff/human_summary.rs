//! Human-readable summary renderer for snapshot diffs.

use crate::diff::model::ModelDiff;

/// Render a Markdown summary of a [`ModelDiff`].
///
/// Informational only; collections without changes are omitted.
pub fn render_human_summary(diff: &ModelDiff) -> String {
    let mut out = String::new();

    out.push_str(&format!("## {} Diff\n\n", diff.model.title()));

    if diff.is_identical() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    out.push_str(&format!(
        "**Added**: {}  \n**Removed**: {}\n\n",
        diff.total_added(),
        diff.total_removed()
    ));

    for collection in diff.collections.iter().filter(|c| !c.is_empty()) {
        out.push_str(&format!("### {}\n\n", collection.kind.title()));
        for element in &collection.added {
            out.push_str(&format!("- `+` {}\n", element));
        }
        for element in &collection.removed {
            out.push_str(&format!("- `-` {}\n", element));
        }
        out.push('\n');
    }

    if diff.flow_changed {
        out.push_str("- **Flow order changed**\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compute_diff;
    use crate::model::{Element, ElementKind, ModelContents, ModelKind};

    #[test]
    fn test_identical_summary() {
        let a = ModelContents::empty(ModelKind::UseCase);
        let diff = compute_diff(&a, &a).unwrap();
        assert!(render_human_summary(&diff).contains("No changes"));
    }

    #[test]
    fn test_summary_lists_changes_by_collection() {
        let mut a = ModelContents::empty(ModelKind::UseCase);
        a.replace(ElementKind::Actor, vec![Element::new("Clerk")]).unwrap();
        let mut b = ModelContents::empty(ModelKind::UseCase);
        b.replace(ElementKind::Actor, vec![Element::new("Customer")]).unwrap();

        let summary = render_human_summary(&compute_diff(&a, &b).unwrap());
        assert!(summary.contains("### Actor List"));
        assert!(summary.contains("`+` Customer"));
        assert!(summary.contains("`-` Clerk"));
    }
}
