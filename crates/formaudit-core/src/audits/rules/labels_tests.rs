use formaudit_protocols::{BoundaryKind, TreeNode};

use super::*;
use crate::suggest::Suggesters;

fn check(
    run: fn(&AuditScope<'_>) -> Option<AuditResult>,
    children: Vec<TreeNode>,
) -> (Tree, Option<AuditResult>) {
    let tree = Tree::normalize(&TreeNode::root(children));
    let suggesters = Suggesters::default();
    let result = run(&AuditScope::new(&tree, &suggesters));
    (tree, result)
}

fn label(text: &str) -> TreeNode {
    TreeNode::element("label").with_child(TreeNode::text(text))
}

#[test]
fn test_empty_label() {
    let (_, result) = check(label_empty, vec![label("")]);
    assert_eq!(result.unwrap().items.len(), 1);

    let (_, result) = check(label_empty, vec![label("hi")]);
    assert!(result.is_none());
}

#[test]
fn test_whitespace_only_label_is_empty() {
    let (_, result) = check(label_empty, vec![label("  \n ")]);
    assert!(result.is_some());
}

#[test]
fn test_label_text_ignores_frame_documents() {
    let framed = TreeNode::element("label").with_child(
        TreeNode::element("iframe").with_child(TreeNode::boundary(
            BoundaryKind::Document,
            vec![TreeNode::text("inside frame")],
        )),
    );
    let (_, result) = check(label_empty, vec![framed]);
    assert!(result.is_some());
}

#[test]
fn test_duplicate_label_text_per_form() {
    let (tree, result) = check(
        label_unique,
        vec![
            TreeNode::element("form").with_children(vec![label("Email"), label(" Email ")]),
            TreeNode::element("form").with_child(label("Email")),
        ],
    );
    let result = result.unwrap();
    assert_eq!(result.items.len(), 1);
    let duplicates = result.items[0].context.duplicates();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(
        tree.closest_parent(duplicates[0], "form"),
        tree.closest_parent(result.items[0].node, "form")
    );
}

#[test]
fn test_interactive_content_reasons() {
    let (tree, result) = check(
        label_no_interactive_content,
        vec![TreeNode::element("label").with_children(vec![
            TreeNode::element("h2").with_child(TreeNode::text("Title")),
            TreeNode::element("a").with_attr("href", "/terms"),
            TreeNode::element("input"),
        ])],
    );
    let result = result.unwrap();
    assert_eq!(result.items.len(), 1);
    let AuditContext::Reasons { reasons } = &result.items[0].context else {
        panic!("expected reasons");
    };
    assert_eq!(reasons.len(), 2);
    assert_eq!(reasons[0].kind, ReasonKind::Heading);
    assert!(tree[reasons[0].node].is("h2"));
    assert_eq!(reasons[1].kind, ReasonKind::Interactive);
    assert!(tree[reasons[1].node].is("a"));
}

#[test]
fn test_label_with_nested_field() {
    let (_, result) = check(
        label_no_field,
        vec![label("Name").with_child(TreeNode::element("input"))],
    );
    assert!(result.is_none());
}

#[test]
fn test_label_for_resolves() {
    let (_, result) = check(
        label_no_field,
        vec![
            label("Name").with_attr("for", "name"),
            TreeNode::element("input").with_attr("id", "name"),
        ],
    );
    assert!(result.is_none());
}

#[test]
fn test_label_for_does_not_cross_shadow_root() {
    let (_, result) = check(
        label_no_field,
        vec![
            label("Name").with_attr("for", "name"),
            TreeNode::element("x-input").with_child(TreeNode::boundary(
                BoundaryKind::ShadowRoot,
                vec![TreeNode::element("input").with_attr("id", "name")],
            )),
        ],
    );
    assert_eq!(result.unwrap().items.len(), 1);
}

#[test]
fn test_label_for_non_field_is_unassociated() {
    let (_, result) = check(
        label_no_field,
        vec![
            label("Name").with_attr("for", "name"),
            TreeNode::element("div").with_attr("id", "name"),
        ],
    );
    assert!(result.is_some());
}

#[test]
fn test_label_referenced_by_aria_labelledby() {
    let (_, result) = check(
        label_no_field,
        vec![
            label("Name").with_attr("id", "name-label"),
            TreeNode::element("input").with_attr("aria-labelledby", "hint name-label"),
        ],
    );
    assert!(result.is_none());
}

#[test]
fn test_label_for_empty() {
    let (_, result) = check(
        label_for_empty,
        vec![label("A").with_attr("for", " "), label("B").with_attr("for", "b")],
    );
    assert_eq!(result.unwrap().items.len(), 1);
}

#[test]
fn test_label_for_unique() {
    let (_, result) = check(
        label_for_unique,
        vec![
            label("A").with_attr("for", "x"),
            label("B").with_attr("for", "x"),
            label("C").with_attr("for", "y"),
        ],
    );
    let result = result.unwrap();
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].context.duplicates().len(), 1);
}
