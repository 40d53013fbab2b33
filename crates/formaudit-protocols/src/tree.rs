//! Serializable tree node.
//!
//! This is the persisted format: no parent references, optional fields are
//! omitted when absent.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Boundary crossed by a marker node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryKind {
    /// Children are the top-level children of an element's shadow root.
    #[serde(rename = "#shadow-root")]
    ShadowRoot,
    /// Children are the captured tree of an embedded frame.
    #[serde(rename = "#document")]
    Document,
}

impl BoundaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryKind::ShadowRoot => "#shadow-root",
            BoundaryKind::Document => "#document",
        }
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A captured node.
///
/// Exactly one of `name`, `text` or `kind` is meaningful: elements carry a
/// lowercase `name`, text nodes carry `text`, boundary markers carry `kind`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<BoundaryKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Create an element node with no attributes or children.
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Create a boundary marker wrapping `children`.
    pub fn boundary(kind: BoundaryKind, children: Vec<TreeNode>) -> Self {
        Self {
            kind: Some(kind),
            children: Some(children),
            ..Default::default()
        }
    }

    /// Create a nameless root holding `children`.
    pub fn root(children: Vec<TreeNode>) -> Self {
        Self {
            children: Some(children),
            ..Default::default()
        }
    }

    /// Builder: set an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builder: append a child.
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Builder: append several children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        self.children.get_or_insert_with(Vec::new).extend(children);
        self
    }

    /// Attribute value, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|attrs| attrs.get(key))
            .map(String::as_str)
    }

    /// Children, or an empty slice.
    pub fn child_nodes(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.child_nodes().iter().map(TreeNode::count).sum::<usize>()
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
