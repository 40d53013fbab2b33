//! Report scoring and rendering.

use std::fmt::Write;

use formaudit_core::audits::AuditContext;
use formaudit_core::{AuditReport, AuditResult, Severity};

/// Percentage of enabled audits that produced no diagnostic.
pub(crate) fn score(enabled: usize, results: &[AuditResult]) -> f64 {
    if enabled == 0 {
        return 100.0;
    }
    let passed = enabled.saturating_sub(results.len());
    (passed as f64 / enabled as f64 * 1000.0).round() / 10.0
}

/// Human-readable report, one block per diagnostic.
pub(crate) fn render_text(report: &AuditReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Score: {}", report.score);

    if report.results.is_empty() {
        let _ = writeln!(out, "No issues found");
        return out;
    }

    for result in &report.results {
        let severity = match result.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        let _ = writeln!(out);
        let _ = write!(out, "{severity}[{}]: {}", result.audit_type, result.title);
        match &result.details {
            Some(details) => {
                let _ = writeln!(out, " ({details})");
            }
            None => {
                let _ = writeln!(out);
            }
        }

        for item in &result.items {
            let _ = write!(out, "  {}", item.node.selector);
            if let Some(note) = context_note(&item.context) {
                let _ = write!(out, "  {note}");
            }
            let _ = writeln!(out);
        }

        for reference in &result.references {
            let _ = writeln!(out, "  see: {} <{}>", reference.title, reference.url);
        }
    }

    out
}

fn context_note<N>(context: &AuditContext<N>) -> Option<String> {
    match context {
        AuditContext::None => None,
        AuditContext::Suggestion { suggestion } => Some(format!("suggestion: {suggestion}")),
        AuditContext::InvalidAttribute {
            attribute,
            suggestion,
        } => Some(match suggestion {
            Some(s) => format!("attribute: {attribute} (did you mean {s}?)"),
            None => format!("attribute: {attribute}"),
        }),
        AuditContext::InvalidValue { value, suggestion } => Some(match suggestion {
            Some(s) => format!("value: {value:?} (did you mean {s}?)"),
            None => format!("value: {value:?}"),
        }),
        AuditContext::Duplicates { duplicates } => {
            Some(format!("{} duplicate(s)", duplicates.len()))
        }
        AuditContext::Reasons { reasons } => Some(format!("{} reason(s)", reasons.len())),
        AuditContext::MissingReferences { ids } => Some(format!("missing: {}", ids.join(", "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formaudit_core::{AuditRunner, AuditType};
    use formaudit_protocols::TreeNode;

    fn empty_label_page() -> TreeNode {
        TreeNode::root(vec![
            TreeNode::element("form").with_children([
                TreeNode::element("label").with_child(TreeNode::text("")),
                TreeNode::element("input")
                    .with_attr("id", "email")
                    .with_attr("autocomplete", "emial"),
            ]),
        ])
    }

    #[test]
    fn test_score_all_passed() {
        assert_eq!(score(18, &[]), 100.0);
        assert_eq!(score(0, &[]), 100.0);
    }

    #[test]
    fn test_score_rounds_to_one_decimal() {
        let runner = AuditRunner::default();
        let (_, results) = runner.audit(&empty_label_page());
        assert!(!results.is_empty());
        let value = score(3, &results[..1]);
        assert_eq!(value, 66.7);
    }

    #[test]
    fn test_render_text() {
        let runner = AuditRunner::default();
        let (tree, results) = runner.audit(&empty_label_page());
        let report = AuditReport::render(&tree, &results, score(runner.enabled_count(), &results));
        let text = render_text(&report);

        assert!(text.starts_with("Score: "));
        assert!(text.contains(&format!("error[{}]", AuditType::LabelEmpty)));
        assert!(text.contains("  form > label\n"));
        assert!(text.contains("(did you mean email?)"));
    }

    #[test]
    fn test_render_text_clean() {
        let report = AuditReport {
            score: 100.0,
            results: Vec::new(),
        };
        assert_eq!(render_text(&report), "Score: 100\nNo issues found\n");
    }
}
