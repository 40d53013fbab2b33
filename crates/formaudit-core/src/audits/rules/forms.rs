use super::{FORM_CONTROLS, MDN_FORM, WEB_DEV_FORMS, finding};
use crate::audits::registry::{AuditDefinition, AuditScope};
use crate::audits::types::{AuditCategory, AuditItem, AuditResult, AuditType, Severity};

pub(super) const AUDITS: &[AuditDefinition] = &[AuditDefinition {
    audit_type: AuditType::FormEmpty,
    category: AuditCategory::Forms,
    run: empty_forms,
}];

/// A form with no descendant control. Visibility and validity do not matter.
fn empty_forms(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let items = tree
        .select(&["form"])
        .into_iter()
        .filter(|form| tree.find_descendants(*form, FORM_CONTROLS).is_empty())
        .map(AuditItem::new)
        .collect();

    finding(
        AuditType::FormEmpty,
        Severity::Error,
        "Forms should contain at least one form field",
        items,
        &[
            ("The form element", MDN_FORM),
            ("Learn Forms", WEB_DEV_FORMS),
        ],
    )
}
