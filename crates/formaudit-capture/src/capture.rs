//! Breadth-first capture of a live document into a [`TreeNode`].
//!
//! Capture walks one realm. Shadow roots are flattened into the same walk
//! behind a `#shadow-root` marker. Iframes are reached through the injected
//! [`FrameTransport`]: the walk suspends until the frame answers or the
//! request times out, and a frame that does not answer is simply left out.

use std::collections::{BTreeMap, VecDeque};

use formaudit_core::strings::{condense_whitespace, truncate};
use formaudit_protocols::{BoundaryKind, FrameIdentity, FrameTransport, InspectRequest, TransportError, TreeNode};
use tracing::{debug, warn};

use crate::config::CaptureConfig;
use crate::dom::{LiveDom, NodeKind};

/// Index of the synthetic holder every top-level capture hangs from.
const HOLDER: usize = 0;

struct Draft {
    node: TreeNode,
    children: Vec<usize>,
}

/// Flat arena of captured nodes, assembled into a tree at the end.
struct Builder {
    drafts: Vec<Draft>,
}

impl Builder {
    fn new() -> Self {
        Self {
            drafts: vec![Draft {
                node: TreeNode::default(),
                children: Vec::new(),
            }],
        }
    }

    fn push(&mut self, parent: usize, node: TreeNode) -> usize {
        let idx = self.drafts.len();
        self.drafts.push(Draft {
            node,
            children: Vec::new(),
        });
        self.drafts[parent].children.push(idx);
        idx
    }

    fn len(&self) -> usize {
        self.drafts.len() - 1
    }

    fn assemble(&mut self, idx: usize) -> TreeNode {
        let children = std::mem::take(&mut self.drafts[idx].children);
        let mut node = std::mem::take(&mut self.drafts[idx].node);
        if !children.is_empty() {
            node.children = Some(children.into_iter().map(|c| self.assemble(c)).collect());
        }
        node
    }
}

/// Capture `root` and everything reachable from it.
///
/// A document root yields a nameless node holding the document's children.
/// An element root yields that element, or an empty node when it is hidden.
pub async fn capture<D: LiveDom>(
    dom: &D,
    root: D::Node,
    transport: &dyn FrameTransport,
    config: &CaptureConfig,
) -> TreeNode {
    let mut builder = Builder::new();
    let mut queue: VecDeque<(D::Node, usize)> = VecDeque::from([(root, HOLDER)]);
    let mut frames = 0usize;

    while let Some((node, parent)) = queue.pop_front() {
        if !accepts(dom, node) {
            continue;
        }

        match dom.kind(node) {
            NodeKind::Document => {
                queue.extend(dom.children(node).into_iter().map(|c| (c, parent)));
            }
            NodeKind::Text => {
                if let Some(text) = capture_text(dom, node, config) {
                    builder.push(parent, TreeNode::text(text));
                }
            }
            NodeKind::Element => {
                let Some(tag) = dom.tag_name(node) else {
                    continue;
                };
                let idx = builder.push(parent, capture_element(dom, node, &tag, config));
                if config.is_ignored_tag(&tag) {
                    continue;
                }

                if let Some(shadow) = dom.shadow_root(node) {
                    let marker = builder.push(idx, boundary(BoundaryKind::ShadowRoot));
                    queue.extend(dom.children(shadow).into_iter().map(|c| (c, marker)));
                }

                if let Some(target) = dom.frame_target(node) {
                    if let Some(document) = inspect_frame(transport, target, config).await {
                        let mut marker = boundary(BoundaryKind::Document);
                        marker.children = Some(vec![document]);
                        builder.push(idx, marker);
                        frames += 1;
                    }
                }

                queue.extend(dom.children(node).into_iter().map(|c| (c, idx)));
            }
            NodeKind::Other => {}
        }
    }

    debug!("Captured {} nodes, {} frame(s)", builder.len(), frames);

    if dom.kind(root) == NodeKind::Document {
        return builder.assemble(HOLDER);
    }
    match builder.drafts[HOLDER].children.first().copied() {
        Some(first) => builder.assemble(first),
        None => TreeNode::default(),
    }
}

fn boundary(kind: BoundaryKind) -> TreeNode {
    TreeNode {
        kind: Some(kind),
        ..Default::default()
    }
}

/// Non-HTML nodes are always visible. HTML elements need a rendered box
/// unless the realm has no layout information at all.
fn is_visible<D: LiveDom>(dom: &D, node: D::Node) -> bool {
    if !dom.is_html(node) {
        return true;
    }
    dom.layout(node).is_none_or(|layout| layout.is_rendered())
}

/// A node is captured when it or its parent is visible.
fn accepts<D: LiveDom>(dom: &D, node: D::Node) -> bool {
    is_visible(dom, node) || dom.parent(node).is_some_and(|p| is_visible(dom, p))
}

fn capture_text<D: LiveDom>(dom: &D, node: D::Node, config: &CaptureConfig) -> Option<String> {
    let text = condense_whitespace(&dom.text(node)?);
    if text.is_empty() {
        return None;
    }
    Some(truncate(&text, config.max_value_length))
}

fn capture_element<D: LiveDom>(
    dom: &D,
    node: D::Node,
    tag: &str,
    config: &CaptureConfig,
) -> TreeNode {
    let attributes: BTreeMap<String, String> = dom
        .attributes(node)
        .into_iter()
        .filter(|(name, _)| !config.is_ignored_attribute(name))
        .map(|(name, value)| (name, truncate(&value, config.max_value_length)))
        .collect();

    TreeNode {
        name: Some(tag.to_string()),
        attributes: (!attributes.is_empty()).then_some(attributes),
        ..Default::default()
    }
}

/// Ask the frame's realm for its tree. Failures are logged and yield `None`.
async fn inspect_frame(
    transport: &dyn FrameTransport,
    target: FrameIdentity,
    config: &CaptureConfig,
) -> Option<TreeNode> {
    debug!(name = %target.name, url = %target.url, "Inspecting frame");
    let request = InspectRequest::new(target.name.clone(), target.url.clone());

    let outcome = match tokio::time::timeout(config.frame_timeout, transport.request(request)).await {
        Ok(reply) => reply,
        Err(_) => Err(TransportError::Timeout),
    };

    match outcome {
        Ok(document) => Some(document),
        Err(e) => {
            warn!("Skipping frame (name: {:?}, url: {:?}): {}", target.name, target.url, e);
            None
        }
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
