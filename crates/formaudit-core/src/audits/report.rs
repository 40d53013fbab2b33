//! Serializable audit output.
//!
//! Results reference nodes by [`NodeId`], which only means something next to
//! the [`Tree`] they came from. A report replaces every handle with a
//! [`NodeRef`]: the stripped node plus its highlight path and selector.

use formaudit_protocols::TreeNode;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::types::{AuditItem, AuditResult};
use crate::strings::pluralize;
use crate::tree::{NodeId, Tree, path_to_query_selector};

/// A node as it appears in serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRef {
    pub node: TreeNode,
    pub path: String,
    pub selector: String,
}

impl NodeRef {
    pub fn new(tree: &Tree, id: NodeId) -> Self {
        let path = tree.path(id);
        Self {
            node: tree.strip(id, false),
            selector: path_to_query_selector(&path),
            path,
        }
    }
}

/// A rendered item reads `{node, path, selector, context}`.
impl Serialize for AuditItem<NodeRef> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut item = serializer.serialize_struct("AuditItem", 4)?;
        item.serialize_field("node", &self.node.node)?;
        item.serialize_field("path", &self.node.path)?;
        item.serialize_field("selector", &self.node.selector)?;
        item.serialize_field("context", &self.context)?;
        item.end()
    }
}

/// `{score, results}` as handed to a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub score: f64,
    pub results: Vec<AuditResult<NodeRef>>,
}

impl AuditReport {
    /// Resolve node handles against `tree` and fill in missing details.
    pub fn render(tree: &Tree, results: &[AuditResult], score: f64) -> Self {
        let results = results
            .iter()
            .map(|result| {
                let mut rendered = result.map_nodes(|id| NodeRef::new(tree, *id));
                if rendered.details.is_none() {
                    rendered.details = Some(format!(
                        "{} affected",
                        pluralize(rendered.items.len(), "element", "elements")
                    ));
                }
                rendered
            })
            .collect();

        Self { score, results }
    }

    /// Total number of flagged items.
    pub fn item_count(&self) -> usize {
        self.results.iter().map(|r| r.items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::audits::run_audits;

    #[test]
    fn test_render_unique_names() {
        let tree = Tree::normalize(&TreeNode::root(vec![TreeNode::element("form").with_children(
            vec![
                TreeNode::element("input").with_attr("name", "x"),
                TreeNode::element("input").with_attr("name", "x"),
            ],
        )]));
        let results: Vec<AuditResult> = run_audits(&tree)
            .into_iter()
            .filter(|r| r.audit_type == crate::audits::AuditType::UniqueNames)
            .collect();
        let report = AuditReport::render(&tree, &results, 50.0);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["score"], json!(50.0));
        let result = &value["results"][0];
        assert_eq!(result["auditType"], json!("unique-names"));
        assert_eq!(result["type"], json!("error"));
        assert_eq!(result["details"], json!("1 element affected"));

        let item = &result["items"][0];
        assert_eq!(item["path"], json!("/form/input[0]"));
        assert_eq!(item["selector"], json!("form > input:nth-of-type(1)"));
        assert_eq!(
            item["node"],
            json!({"name": "input", "attributes": {"name": "x"}})
        );
        assert_eq!(
            item["context"]["duplicates"][0]["path"],
            json!("/form/input[1]")
        );
        assert_eq!(
            item.as_object().unwrap().keys().collect::<Vec<_>>(),
            ["context", "node", "path", "selector"]
        );
    }

    #[test]
    fn test_item_count() {
        let tree = Tree::normalize(&TreeNode::root(vec![
            TreeNode::element("form"),
            TreeNode::element("form"),
        ]));
        let report = AuditReport::render(&tree, &run_audits(&tree), 0.0);
        assert_eq!(report.item_count(), 2);
        assert_eq!(
            report.results[0].details.as_deref(),
            Some("2 elements affected")
        );
    }
}
