use super::{FORM_FIELDS, MDN_AUTOCOMPLETE, finding};
use crate::audits::registry::{AuditDefinition, AuditScope};
use crate::audits::types::{
    AuditCategory, AuditContext, AuditItem, AuditResult, AuditType, Severity,
};
use crate::suggest::vocabulary::is_valid_autocomplete_token;
use crate::tree::{NodeId, Tree};

pub(super) const AUDITS: &[AuditDefinition] = &[
    AuditDefinition {
        audit_type: AuditType::AutocompleteSuggested,
        category: AuditCategory::Autocomplete,
        run: autocomplete_suggested,
    },
    AuditDefinition {
        audit_type: AuditType::AutocompleteEmpty,
        category: AuditCategory::Autocomplete,
        run: autocomplete_empty,
    },
    AuditDefinition {
        audit_type: AuditType::AutocompleteOff,
        category: AuditCategory::Autocomplete,
        run: autocomplete_off,
    },
    AuditDefinition {
        audit_type: AuditType::AutocompleteInvalid,
        category: AuditCategory::Autocomplete,
        run: autocomplete_invalid,
    },
];

const WEB_DEV_AUTOFILL: &str = "https://web.dev/learn/forms/autofill/";

/// Input types that never take an autofill value.
const NO_AUTOFILL_TYPES: &[&str] = &[
    "button", "checkbox", "file", "hidden", "image", "radio", "reset", "submit",
];

/// Elements that accept an `autocomplete` attribute.
const AUTOCOMPLETE_ELEMENTS: &[&str] = &["form", "input", "select", "textarea"];

fn references() -> [(&'static str, &'static str); 2] {
    [
        ("The autocomplete attribute", MDN_AUTOCOMPLETE),
        ("Help users avoid re-entering data", WEB_DEV_AUTOFILL),
    ]
}

fn takes_autofill(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    !node
        .input_type()
        .is_some_and(|t| NO_AUTOFILL_TYPES.contains(&t.as_str()))
}

fn autocomplete_suggested(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let mut items = Vec::new();

    for id in tree.select(FORM_FIELDS) {
        let node = &tree[id];
        if node.has_attr("autocomplete") || !takes_autofill(tree, id) {
            continue;
        }
        let suggestion = ["id", "name"]
            .iter()
            .filter_map(|key| node.attr_trimmed(key))
            .find_map(|identifier| scope.suggesters.autocomplete_for_identifier(identifier));
        if let Some(suggestion) = suggestion {
            items.push(AuditItem::with_context(
                id,
                AuditContext::Suggestion { suggestion },
            ));
        }
    }

    finding(
        AuditType::AutocompleteSuggested,
        Severity::Warning,
        "Fields should use autocomplete when a matching token exists",
        items,
        &references(),
    )
}

fn autocomplete_empty(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let items = tree
        .select(AUTOCOMPLETE_ELEMENTS)
        .into_iter()
        .filter(|id| {
            tree[*id]
                .attr("autocomplete")
                .is_some_and(|v| v.trim().is_empty())
        })
        .map(AuditItem::new)
        .collect();

    finding(
        AuditType::AutocompleteEmpty,
        Severity::Error,
        "Autocomplete values should not be empty",
        items,
        &references(),
    )
}

fn autocomplete_off(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let items = tree
        .select(AUTOCOMPLETE_ELEMENTS)
        .into_iter()
        .filter(|id| {
            tree[*id]
                .attr("autocomplete")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("off"))
        })
        .map(AuditItem::new)
        .collect();

    finding(
        AuditType::AutocompleteOff,
        Severity::Warning,
        "Autocomplete should not be turned off",
        items,
        &references(),
    )
}

/// One item per unknown token. `off` is reported by [`autocomplete_off`].
fn autocomplete_invalid(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let mut items = Vec::new();

    for id in tree.select(FORM_FIELDS) {
        let Some(value) = tree[id].attr("autocomplete") else {
            continue;
        };
        for token in value.split_whitespace() {
            if token.eq_ignore_ascii_case("off") || is_valid_autocomplete_token(token) {
                continue;
            }
            items.push(AuditItem::with_context(
                id,
                AuditContext::InvalidValue {
                    value: token.to_string(),
                    suggestion: scope.suggesters.autocomplete(token),
                },
            ));
        }
    }

    finding(
        AuditType::AutocompleteInvalid,
        Severity::Error,
        "Autocomplete values should be valid tokens",
        items,
        &references(),
    )
}
