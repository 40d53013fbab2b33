//! Built-in audit rules, one module per category.

mod attributes;
mod autocomplete;
mod forms;
mod inputs;
mod labels;

use std::collections::HashMap;
use std::hash::Hash;

use super::registry::AuditDefinition;
use super::types::{AuditContext, AuditItem, AuditResult, AuditType, Reference, Severity};
use crate::tree::{NodeId, Tree};

/// Elements that make a form non-empty.
pub(crate) const FORM_CONTROLS: &[&str] = &["button", "input", "select", "textarea"];

/// Elements audited as data-entry fields.
pub(crate) const FORM_FIELDS: &[&str] = &["input", "select", "textarea"];

/// Elements a label can point at with `for`.
pub(crate) const LABELABLE: &[&str] = &[
    "button", "input", "meter", "output", "progress", "select", "textarea",
];

/// Input types that never carry a user-visible value needing a label.
pub(crate) const UNLABELLED_INPUT_TYPES: &[&str] = &["button", "hidden", "image", "reset", "submit"];

pub(crate) const MDN_FORM: &str = "https://developer.mozilla.org/docs/Web/HTML/Element/form";
pub(crate) const MDN_INPUT: &str = "https://developer.mozilla.org/docs/Web/HTML/Element/input";
pub(crate) const MDN_LABEL: &str = "https://developer.mozilla.org/docs/Web/HTML/Element/label";
pub(crate) const MDN_AUTOCOMPLETE: &str =
    "https://developer.mozilla.org/docs/Web/HTML/Attributes/autocomplete";
pub(crate) const WEB_DEV_FORMS: &str = "https://web.dev/learn/forms/";

/// Every built-in audit in execution order.
pub(crate) fn builtin() -> Vec<AuditDefinition> {
    [
        forms::AUDITS,
        attributes::AUDITS,
        autocomplete::AUDITS,
        labels::AUDITS,
        inputs::AUDITS,
    ]
    .concat()
}

/// Build a result, or `None` when nothing was flagged.
pub(crate) fn finding(
    audit_type: AuditType,
    severity: Severity,
    title: &str,
    items: Vec<AuditItem>,
    references: &[(&str, &str)],
) -> Option<AuditResult> {
    if items.is_empty() {
        return None;
    }
    Some(AuditResult {
        audit_type,
        title: title.to_string(),
        severity,
        items,
        references: references
            .iter()
            .map(|(title, url)| Reference::new(*title, *url))
            .collect(),
        details: None,
    })
}

/// Group nodes by key and report each group with more than one member.
///
/// The item node is the first occurrence; `duplicates` holds the rest in
/// input order. Groups are reported in order of their first occurrence.
pub(crate) fn duplicate_groups<K: Hash + Eq>(
    entries: impl IntoIterator<Item = (K, NodeId)>,
) -> Vec<AuditItem> {
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<NodeId>> = Vec::new();

    for (key, node) in entries {
        match index.get(&key) {
            Some(&i) => groups[i].push(node),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![node]);
            }
        }
    }

    groups
        .into_iter()
        .filter(|group| group.len() > 1)
        .map(|mut group| {
            let first = group.remove(0);
            AuditItem::with_context(first, AuditContext::Duplicates { duplicates: group })
        })
        .collect()
}

/// Whether an `input` should be treated as a labelled data-entry field.
pub(crate) fn needs_label(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    if !node.is_any(FORM_FIELDS) {
        return false;
    }
    !(node.is("input")
        && node
            .input_type()
            .is_some_and(|t| UNLABELLED_INPUT_TYPES.contains(&t.as_str())))
}

/// Whether any id in `aria-labelledby` resolves to an element in scope.
fn labelled_by_reference(tree: &Tree, field: NodeId, scope: NodeId) -> bool {
    tree[field]
        .attr("aria-labelledby")
        .map(|refs| {
            refs.split_whitespace()
                .any(|r| tree.element_by_id(scope, r).is_some())
        })
        .unwrap_or(false)
}

/// A field is labelled by containment, by a matching `for`, or by
/// `aria-labelledby`.
pub(crate) fn is_labelled(tree: &Tree, field: NodeId) -> bool {
    if tree.closest_parent(field, "label").is_some() {
        return true;
    }
    let scope = tree.closest_root(field);
    if let Some(id) = tree[field].attr_trimmed("id") {
        let has_for = tree.scoped(scope).into_iter().any(|candidate| {
            tree[candidate].is("label") && tree[candidate].attr_trimmed("for") == Some(id)
        });
        if has_for {
            return true;
        }
    }
    labelled_by_reference(tree, field, scope)
}
