//! Label audits.
//!
//! Labels are checked for content, uniqueness within their form, allowed
//! descendants and association with a field. Association follows the same
//! three routes browsers use: containment, `for`, and `aria-labelledby`.

use super::{FORM_FIELDS, LABELABLE, MDN_LABEL, WEB_DEV_FORMS, duplicate_groups, finding};
use crate::audits::registry::{AuditDefinition, AuditScope};
use crate::audits::types::{
    AuditCategory, AuditContext, AuditItem, AuditResult, AuditType, Reason, ReasonKind, Severity,
};
use crate::strings::condense_whitespace;
use crate::tree::{NodeId, Tree};

pub(super) const AUDITS: &[AuditDefinition] = &[
    AuditDefinition {
        audit_type: AuditType::LabelEmpty,
        category: AuditCategory::Labels,
        run: label_empty,
    },
    AuditDefinition {
        audit_type: AuditType::LabelUnique,
        category: AuditCategory::Labels,
        run: label_unique,
    },
    AuditDefinition {
        audit_type: AuditType::LabelNoInteractiveContent,
        category: AuditCategory::Labels,
        run: label_no_interactive_content,
    },
    AuditDefinition {
        audit_type: AuditType::LabelNoField,
        category: AuditCategory::Labels,
        run: label_no_field,
    },
    AuditDefinition {
        audit_type: AuditType::LabelForEmpty,
        category: AuditCategory::Labels,
        run: label_for_empty,
    },
    AuditDefinition {
        audit_type: AuditType::LabelForUnique,
        category: AuditCategory::Labels,
        run: label_for_unique,
    },
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "hgroup"];
const INTERACTIVE: &[&str] = &["a", "details", "embed", "iframe", "label", "summary"];

const LABEL_REFERENCES: &[(&str, &str)] = &[
    ("The label element", MDN_LABEL),
    ("Learn Forms: labels", WEB_DEV_FORMS),
];

fn labels(tree: &Tree) -> Vec<NodeId> {
    tree.select(&["label"])
}

fn label_text(tree: &Tree, label: NodeId) -> String {
    condense_whitespace(&tree.text_content(label))
}

fn label_empty(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let items = labels(tree)
        .into_iter()
        .filter(|label| label_text(tree, *label).is_empty())
        .map(AuditItem::new)
        .collect();

    finding(
        AuditType::LabelEmpty,
        Severity::Error,
        "Labels should have text content",
        items,
        LABEL_REFERENCES,
    )
}

/// Labels sharing text within the same form. Labels outside any form share
/// one scope.
fn label_unique(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let entries = labels(tree).into_iter().filter_map(|label| {
        let text = label_text(tree, label);
        if text.is_empty() {
            return None;
        }
        Some(((tree.closest_parent(label, "form"), text), label))
    });

    finding(
        AuditType::LabelUnique,
        Severity::Error,
        "Labels within a form should be unique",
        duplicate_groups(entries),
        LABEL_REFERENCES,
    )
}

fn label_no_interactive_content(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let mut items = Vec::new();

    for label in labels(tree) {
        let reasons: Vec<Reason> = tree
            .preorder(label)
            .skip(1)
            .filter_map(|node| {
                let n = &tree[node];
                let kind = if n.is_any(HEADINGS) {
                    ReasonKind::Heading
                } else if n.is_any(INTERACTIVE) {
                    ReasonKind::Interactive
                } else {
                    return None;
                };
                Some(Reason { kind, node })
            })
            .collect();

        if !reasons.is_empty() {
            items.push(AuditItem::with_context(label, AuditContext::Reasons { reasons }));
        }
    }

    finding(
        AuditType::LabelNoInteractiveContent,
        Severity::Error,
        "Labels should not contain headings or interactive elements",
        items,
        LABEL_REFERENCES,
    )
}

/// Whether `label` is tied to at least one field.
fn has_field(tree: &Tree, label: NodeId) -> bool {
    if !tree.find_descendants(label, FORM_FIELDS).is_empty() {
        return true;
    }

    let root = tree.closest_root(label);
    let node = &tree[label];

    if let Some(target) = node.attr_trimmed("for") {
        let resolves = tree
            .element_by_id(root, target)
            .is_some_and(|field| tree[field].is_any(LABELABLE));
        if resolves {
            return true;
        }
    }

    if let Some(id) = node.attr_trimmed("id") {
        return tree.scoped(root).into_iter().any(|candidate| {
            let field = &tree[candidate];
            field.is_any(FORM_FIELDS)
                && field
                    .attr("aria-labelledby")
                    .is_some_and(|refs| refs.split_whitespace().any(|r| r == id))
        });
    }

    false
}

fn label_no_field(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let items = labels(tree)
        .into_iter()
        .filter(|label| !has_field(tree, *label))
        .map(AuditItem::new)
        .collect();

    finding(
        AuditType::LabelNoField,
        Severity::Error,
        "Labels should be associated with a form field",
        items,
        LABEL_REFERENCES,
    )
}

fn label_for_empty(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let items = labels(tree)
        .into_iter()
        .filter(|label| tree[*label].attr("for").is_some_and(|v| v.trim().is_empty()))
        .map(AuditItem::new)
        .collect();

    finding(
        AuditType::LabelForEmpty,
        Severity::Error,
        "Label for attributes should not be empty",
        items,
        LABEL_REFERENCES,
    )
}

fn label_for_unique(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let entries = labels(tree).into_iter().filter_map(|label| {
        let target = tree[label].attr_trimmed("for")?;
        Some(((tree.closest_root(label), target), label))
    });

    finding(
        AuditType::LabelForUnique,
        Severity::Error,
        "Label for attributes should be unique",
        duplicate_groups(entries),
        LABEL_REFERENCES,
    )
}

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;
