//! Structural queries over a [`Tree`].

use formaudit_protocols::BoundaryKind;

use super::{NodeId, Tree};

/// Depth-first pre-order iterator: parent before children, left before right.
pub struct Preorder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree[id].children.iter().rev().copied());
        Some(id)
    }
}

impl Tree {
    /// `id` followed by all its descendants in document order.
    ///
    /// Descends through every boundary marker.
    pub fn preorder(&self, id: NodeId) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![id],
        }
    }

    /// Descendants of `id` (excluding `id`) whose name is in `names`.
    pub fn find_descendants(&self, id: NodeId, names: &[&str]) -> Vec<NodeId> {
        self.preorder(id)
            .skip(1)
            .filter(|d| self[*d].is_any(names))
            .collect()
    }

    /// Every element in the tree, root included, whose name is in `names`.
    pub fn select(&self, names: &[&str]) -> Vec<NodeId> {
        self.preorder(self.root())
            .filter(|d| self[*d].is_any(names))
            .collect()
    }

    /// Space-joined text of `id` and its descendants in document order.
    ///
    /// Subtrees under a `#document` marker are skipped so that frame content
    /// never leaks into the text of the element hosting the frame. Shadow-root
    /// content is included.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            let node = &self[current];
            if current != id && node.is_boundary(BoundaryKind::Document) {
                continue;
            }
            if let Some(text) = node.text.as_deref().filter(|t| !t.is_empty()) {
                parts.push(text);
            }
            stack.extend(node.children.iter().rev().copied());
        }

        parts.join(" ")
    }

    /// Nearest ancestor called `name`.
    pub fn closest_parent(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.ancestors(id).find(|a| self[*a].is(name))
    }

    /// Nearest `#document` / `#shadow-root` ancestor, or the tree root.
    pub fn closest_root(&self, id: NodeId) -> NodeId {
        self.ancestors(id)
            .find(|a| self[*a].kind.is_some())
            .unwrap_or_else(|| self.root())
    }

    /// Nodes whose closest root is `scope`, in document order.
    ///
    /// Unlike [`Tree::preorder`] this does not descend into nested boundary
    /// markers.
    pub fn scoped(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self[scope].children.iter().rev().copied().collect();

        while let Some(current) = stack.pop() {
            let node = &self[current];
            if node.kind.is_some() {
                continue;
            }
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }

        out
    }

    /// First element in `scope` whose `id` attribute equals `value`.
    pub fn element_by_id(&self, scope: NodeId, value: &str) -> Option<NodeId> {
        self.scoped(scope)
            .into_iter()
            .find(|candidate| self[*candidate].attr("id") == Some(value))
    }
}
