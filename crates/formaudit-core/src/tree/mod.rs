//! Parent-linked tree model.
//!
//! A captured [`TreeNode`] graph is normalized into a [`Tree`]: an arena of
//! [`Node`]s addressed by [`NodeId`]. Every node has concrete `attributes` and
//! `children`, plus a back-reference to its parent stored as an index, so the
//! model stays free of ownership cycles.
//!
//! ## Operations
//!
//! - [`Tree::normalize`] / [`Tree::strip`] - conversion to and from [`TreeNode`]
//! - [`Tree::find_descendants`] - structural pre-order search
//! - [`Tree::text_content`] - label text aggregation (skips frame documents)
//! - [`Tree::closest_parent`] / [`Tree::closest_root`] - ancestor lookups
//! - [`Tree::path`] / [`path_to_query_selector`] - highlight paths

mod path;
mod query;

pub use path::{css_escape_ident, path_to_query_selector};
pub use query::Preorder;

use std::collections::{BTreeMap, VecDeque};
use std::ops::Index;

use formaudit_protocols::{BoundaryKind, TreeNode};
use serde::Serialize;

/// Stable handle to a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A normalized node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: Option<String>,
    pub text: Option<String>,
    pub kind: Option<BoundaryKind>,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    fn from_tree_node(source: &TreeNode, parent: Option<NodeId>) -> Self {
        Self {
            name: source.name.clone(),
            text: source.text.clone(),
            kind: source.kind,
            attributes: source.attributes.clone().unwrap_or_default(),
            children: Vec::new(),
            parent,
        }
    }

    /// Attribute value, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attribute value with surrounding whitespace removed, if non-empty.
    pub fn attr_trimmed(&self, key: &str) -> Option<&str> {
        self.attr(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Whether this is an element called `name`.
    pub fn is(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Whether this element's name is one of `names`.
    pub fn is_any(&self, names: &[&str]) -> bool {
        self.name.as_deref().is_some_and(|n| names.contains(&n))
    }

    pub fn is_boundary(&self, kind: BoundaryKind) -> bool {
        self.kind == Some(kind)
    }

    /// Lowercased `type` attribute.
    pub fn input_type(&self) -> Option<String> {
        self.attr("type").map(|t| t.trim().to_ascii_lowercase())
    }
}

/// Arena-backed, parent-linked tree. The root is always the first node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Normalize a captured tree.
    ///
    /// Breadth-first: every node gets default `attributes`/`children`, and each
    /// child's parent is set before it is enqueued.
    pub fn normalize(root: &TreeNode) -> Self {
        let mut nodes = vec![Node::from_tree_node(root, None)];
        let mut queue: VecDeque<(&TreeNode, NodeId)> = VecDeque::new();
        queue.push_back((root, NodeId(0)));

        while let Some((source, id)) = queue.pop_front() {
            for child in source.child_nodes() {
                let child_id = NodeId(nodes.len());
                nodes.push(Node::from_tree_node(child, Some(id)));
                nodes[id.0].children.push(child_id);
                queue.push_back((child, child_id));
            }
        }

        Self { nodes }
    }

    /// Convert a node back to its serializable form.
    ///
    /// Drops the parent link and omits empty `attributes`/`children`. Children
    /// are included only when `include_children` is set.
    pub fn strip(&self, id: NodeId, include_children: bool) -> TreeNode {
        let node = &self[id];
        let children = if include_children && !node.children.is_empty() {
            Some(
                node.children
                    .iter()
                    .map(|child| self.strip(*child, true))
                    .collect(),
            )
        } else {
            None
        };

        TreeNode {
            name: node.name.clone(),
            text: node.text.clone(),
            kind: node.kind,
            attributes: (!node.attributes.is_empty()).then(|| node.attributes.clone()),
            children,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self[id].parent, move |current| self[*current].parent)
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl From<&TreeNode> for Tree {
    fn from(root: &TreeNode) -> Self {
        Tree::normalize(root)
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
