use super::{FORM_FIELDS, MDN_INPUT, duplicate_groups, finding};
use crate::audits::registry::{AuditDefinition, AuditScope};
use crate::audits::types::{
    AuditCategory, AuditContext, AuditItem, AuditResult, AuditType, Severity,
};
use crate::suggest::vocabulary::{FIELD_LIKE_ELEMENTS, is_allowed_attribute};

pub(super) const AUDITS: &[AuditDefinition] = &[
    AuditDefinition {
        audit_type: AuditType::InvalidAttributes,
        category: AuditCategory::Attributes,
        run: invalid_attributes,
    },
    AuditDefinition {
        audit_type: AuditType::MissingIdentifier,
        category: AuditCategory::Attributes,
        run: missing_identifier,
    },
    AuditDefinition {
        audit_type: AuditType::UniqueIds,
        category: AuditCategory::Attributes,
        run: unique_ids,
    },
    AuditDefinition {
        audit_type: AuditType::UniqueNames,
        category: AuditCategory::Attributes,
        run: unique_names,
    },
];

const MDN_ATTRIBUTES: &str = "https://developer.mozilla.org/docs/Web/HTML/Attributes";
const MDN_ID: &str = "https://developer.mozilla.org/docs/Web/HTML/Global_attributes/id";

fn invalid_attributes(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let mut items = Vec::new();

    for id in tree.select(FIELD_LIKE_ELEMENTS) {
        let node = &tree[id];
        let Some(tag) = node.name.as_deref() else {
            continue;
        };
        for attribute in node.attributes.keys() {
            if is_allowed_attribute(tag, attribute) {
                continue;
            }
            items.push(AuditItem::with_context(
                id,
                AuditContext::InvalidAttribute {
                    attribute: attribute.clone(),
                    suggestion: scope.suggesters.attribute(tag, attribute),
                },
            ));
        }
    }

    finding(
        AuditType::InvalidAttributes,
        Severity::Error,
        "Form elements should only use valid attributes",
        items,
        &[("HTML attribute reference", MDN_ATTRIBUTES)],
    )
}

fn missing_identifier(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let items = tree
        .select(FORM_FIELDS)
        .into_iter()
        .filter(|id| {
            let node = &tree[*id];
            let exempt = node
                .input_type()
                .is_some_and(|t| t == "submit" || t == "file");
            !exempt && node.attr_trimmed("id").is_none() && node.attr_trimmed("name").is_none()
        })
        .map(AuditItem::new)
        .collect();

    finding(
        AuditType::MissingIdentifier,
        Severity::Warning,
        "Form fields should have an id or a name",
        items,
        &[("The input element", MDN_INPUT)],
    )
}

/// Ids must be unique within their document or shadow root.
fn unique_ids(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let entries = tree.preorder(tree.root()).filter_map(|id| {
        let node = &tree[id];
        node.name.as_ref()?;
        let value = node.attr("id").filter(|v| !v.is_empty())?;
        Some(((tree.closest_root(id), value), id))
    });

    finding(
        AuditType::UniqueIds,
        Severity::Error,
        "Element ids should be unique",
        duplicate_groups(entries),
        &[("The id attribute", MDN_ID)],
    )
}

/// Names must be unique within the enclosing form. Radio and checkbox groups
/// share names on purpose.
fn unique_names(scope: &AuditScope<'_>) -> Option<AuditResult> {
    let tree = scope.tree;
    let entries = tree.select(FORM_FIELDS).into_iter().filter_map(|id| {
        let node = &tree[id];
        if node
            .input_type()
            .is_some_and(|t| t == "radio" || t == "checkbox")
        {
            return None;
        }
        let name = node.attr("name").filter(|v| !v.is_empty())?;
        Some(((tree.closest_parent(id, "form"), name), id))
    });

    finding(
        AuditType::UniqueNames,
        Severity::Error,
        "Field names should be unique within a form",
        duplicate_groups(entries),
        &[("The input element", MDN_INPUT)],
    )
}

#[cfg(test)]
mod tests {
    use formaudit_protocols::{BoundaryKind, TreeNode};

    use super::*;
    use crate::suggest::Suggesters;
    use crate::tree::Tree;

    fn check(run: fn(&AuditScope<'_>) -> Option<AuditResult>, root: &TreeNode) -> (Tree, Option<AuditResult>) {
        let tree = Tree::normalize(root);
        let suggesters = Suggesters::default();
        let result = run(&AuditScope::new(&tree, &suggesters));
        (tree, result)
    }

    fn input_named(name: &str) -> TreeNode {
        TreeNode::element("input").with_attr("name", name)
    }

    #[test]
    fn test_invalid_attribute_with_suggestion() {
        let root = TreeNode::root(vec![
            TreeNode::element("input")
                .with_attr("autocompete", "email")
                .with_attr("type", "email")
                .with_attr("data-x", "1"),
        ]);
        let (_, result) = check(invalid_attributes, &root);
        let result = result.unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(
            result.items[0].context,
            AuditContext::InvalidAttribute {
                attribute: "autocompete".into(),
                suggestion: Some("autocomplete".into()),
            }
        );
    }

    #[test]
    fn test_invalid_attribute_ignores_other_elements() {
        let root = TreeNode::root(vec![TreeNode::element("div").with_attr("autocompete", "x")]);
        let (_, result) = check(invalid_attributes, &root);
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_identifier() {
        let root = TreeNode::root(vec![
            TreeNode::element("input"),
            TreeNode::element("input").with_attr("type", "submit"),
            TreeNode::element("input").with_attr("id", "a"),
            TreeNode::element("select").with_attr("name", " "),
        ]);
        let (tree, result) = check(missing_identifier, &root);
        let result = result.unwrap();
        assert_eq!(result.severity, Severity::Warning);
        assert_eq!(result.items.len(), 2);
        assert!(tree[result.items[0].node].is("input"));
        assert!(tree[result.items[1].node].is("select"));
    }

    #[test]
    fn test_unique_names_single_duplicate() {
        let root = TreeNode::root(vec![
            TreeNode::element("form").with_children(vec![input_named("x"), input_named("x")]),
        ]);
        let (_, result) = check(unique_names, &root);
        let result = result.unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].context.duplicates().len(), 1);
    }

    #[test]
    fn test_unique_names_scoped_per_form() {
        let root = TreeNode::root(vec![
            TreeNode::element("form").with_child(input_named("x")),
            TreeNode::element("form").with_child(input_named("x")),
        ]);
        let (_, result) = check(unique_names, &root);
        assert!(result.is_none());
    }

    #[test]
    fn test_unique_names_outside_forms_share_scope() {
        let root = TreeNode::root(vec![
            TreeNode::element("div").with_child(input_named("q")),
            input_named("q"),
        ]);
        let (_, result) = check(unique_names, &root);
        assert_eq!(result.unwrap().items.len(), 1);
    }

    #[test]
    fn test_unique_names_radio_exempt() {
        let root = TreeNode::root(vec![TreeNode::element("form").with_children(vec![
            input_named("size").with_attr("type", "radio"),
            input_named("size").with_attr("type", "RADIO"),
            input_named("opt").with_attr("type", "checkbox"),
            input_named("opt").with_attr("type", "checkbox"),
        ])]);
        let (_, result) = check(unique_names, &root);
        assert!(result.is_none());
    }

    #[test]
    fn test_unique_ids_per_root() {
        let root = TreeNode::root(vec![
            TreeNode::element("input").with_attr("id", "a"),
            TreeNode::element("span").with_attr("id", "a"),
            TreeNode::element("x-widget").with_child(TreeNode::boundary(
                BoundaryKind::ShadowRoot,
                vec![TreeNode::element("input").with_attr("id", "a")],
            )),
        ]);
        let (tree, result) = check(unique_ids, &root);
        let result = result.unwrap();
        assert_eq!(result.items.len(), 1);
        assert!(tree[result.items[0].node].is("input"));
        let duplicates = result.items[0].context.duplicates();
        assert_eq!(duplicates.len(), 1);
        assert!(tree[duplicates[0]].is("span"));
    }

    #[test]
    fn test_unique_ids_is_deterministic() {
        let root = TreeNode::root(vec![
            TreeNode::element("a").with_attr("id", "x"),
            TreeNode::element("b").with_attr("id", "x"),
            TreeNode::element("c").with_attr("id", "y"),
            TreeNode::element("d").with_attr("id", "y"),
        ]);
        let (_, first) = check(unique_ids, &root);
        let (_, second) = check(unique_ids, &root);
        assert_eq!(first, second);
        assert_eq!(first.unwrap().items.len(), 2);
    }
}
