use super::{FORM_FIELDS, MDN_INPUT, MDN_LABEL, finding, is_labelled, needs_label};
use crate::audits::registry::{AuditDefinition, AuditScope};
use crate::audits::types::{
    AuditCategory, AuditContext, AuditItem, AuditResult, AuditType, Severity,
};
use crate::suggest::vocabulary::INPUT_TYPES;

pub(super) const AUDITS: &[AuditDefinition] = &[
    AuditDefinition {
        audit_type: AuditType::InputTypeInvalid,
        category: AuditCategory::Inputs,
        run: input_type_invalid,
    },
    AuditDefinition {
        audit_type: AuditType::InputNoLabel,
        category: AuditCategory::Inputs,
        run: input_no_label,
    },
    AuditDefinition {
        audit_type: AuditType::AriaLabelledbyMissing,
        category: AuditCategory::Inputs,
        run: aria_labelledby_missing,
    },
];

const MDN_INPUT_TYPES: &str =
    "https://developer.mozilla.org/docs/Web/HTML/Element/input#input_types";
const MDN_LABELLEDBY: &str =
    "https://developer.mozilla.org/docs/Web/Accessibility/ARIA/Attributes/aria-labelledby";

/// An empty `type` falls back to `text` and is not reported.
fn input_type_invalid(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let mut items = Vec::new();

    for id in tree.select(&["input"]) {
        let Some(raw) = tree[id].attr("type") else {
            continue;
        };
        let value = raw.trim().to_ascii_lowercase();
        if value.is_empty() || INPUT_TYPES.contains(&value.as_str()) {
            continue;
        }
        items.push(AuditItem::with_context(
            id,
            AuditContext::InvalidValue {
                value: raw.to_string(),
                suggestion: scope.suggesters.input_type(&value),
            },
        ));
    }

    finding(
        AuditType::InputTypeInvalid,
        Severity::Error,
        "Inputs should have a valid type",
        items,
        &[("Input types", MDN_INPUT_TYPES)],
    )
}

fn input_no_label(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let items = tree
        .select(FORM_FIELDS)
        .into_iter()
        .filter(|id| needs_label(tree, *id) && !is_labelled(tree, *id))
        .map(AuditItem::new)
        .collect();

    finding(
        AuditType::InputNoLabel,
        Severity::Error,
        "Form fields should have a label",
        items,
        &[("The label element", MDN_LABEL), ("The input element", MDN_INPUT)],
    )
}

/// Every `aria-labelledby` id must resolve within the element's root.
fn aria_labelledby_missing(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let mut items = Vec::new();

    for id in tree.preorder(tree.root()) {
        let Some(refs) = tree[id].attr("aria-labelledby") else {
            continue;
        };
        let root = tree.closest_root(id);
        let missing: Vec<String> = refs
            .split_whitespace()
            .filter(|r| tree.element_by_id(root, r).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            items.push(AuditItem::with_context(
                id,
                AuditContext::MissingReferences { ids: missing },
            ));
        }
    }

    finding(
        AuditType::AriaLabelledbyMissing,
        Severity::Error,
        "aria-labelledby should reference existing elements",
        items,
        &[("aria-labelledby", MDN_LABELLEDBY)],
    )
}
