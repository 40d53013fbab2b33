use super::*;

#[test]
fn test_boundary_kind_serialize() {
    let json = serde_json::to_string(&BoundaryKind::ShadowRoot).unwrap();
    assert_eq!(json, "\"#shadow-root\"");
    let json = serde_json::to_string(&BoundaryKind::Document).unwrap();
    assert_eq!(json, "\"#document\"");
}

#[test]
fn test_tree_node_skips_absent_fields() {
    let node = TreeNode::text("hello");
    let json = serde_json::to_string(&node).unwrap();
    assert_eq!(json, r#"{"text":"hello"}"#);
}

#[test]
fn test_tree_node_deserialize_marker() {
    let json = r##"{"type": "#document", "children": [{"text": "x"}]}"##;
    let node: TreeNode = serde_json::from_str(json).unwrap();
    assert_eq!(node.kind, Some(BoundaryKind::Document));
    assert_eq!(node.child_nodes().len(), 1);
    assert!(node.name.is_none());
}

#[test]
fn test_tree_node_deserialize_spec_shape() {
    let json = r#"{"children":[{"name":"form","children":[
        {"name":"input","attributes":{"name":"x"}},
        {"name":"input","attributes":{"name":"x"}}
    ]}]}"#;
    let node: TreeNode = serde_json::from_str(json).unwrap();
    let form = &node.child_nodes()[0];
    assert_eq!(form.name.as_deref(), Some("form"));
    assert_eq!(form.child_nodes()[1].attr("name"), Some("x"));
    assert_eq!(node.count(), 4);
}

#[test]
fn test_builder_helpers() {
    let node = TreeNode::element("input")
        .with_attr("id", "email")
        .with_attr("type", "email")
        .with_child(TreeNode::text("x"));
    assert_eq!(node.attr("id"), Some("email"));
    assert_eq!(node.attr("missing"), None);
    assert_eq!(node.child_nodes().len(), 1);
}

#[test]
fn test_serialize_roundtrip_preserves_equality() {
    let node = TreeNode::root(vec![
        TreeNode::element("div").with_child(TreeNode::boundary(
            BoundaryKind::ShadowRoot,
            vec![TreeNode::element("input").with_attr("name", "q")],
        )),
    ]);
    let json = serde_json::to_string(&node).unwrap();
    let back: TreeNode = serde_json::from_str(&json).unwrap();
    assert_eq!(back, node);
}
