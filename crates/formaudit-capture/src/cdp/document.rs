//! [`LiveDom`] over a CDP snapshot.
//!
//! A pierced `DOM.getDocument` result nests every iframe's document inside
//! the iframe node. Capture expects each frame to be a separate realm reached
//! through a transport, so the snapshot is split: the top document becomes a
//! [`CdpDocument`] and every `contentDocument` becomes a [`CdpFrame`].

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use formaudit_protocols::{FrameIdentity, FrameResponder, FrameTransport, TreeNode};
use tracing::debug;

use super::protocol::{BoxModel, CdpSnapshot, DomNode};
use crate::capture::capture;
use crate::config::CaptureConfig;
use crate::dom::{LayoutBox, LiveDom, NodeKind};
use crate::error::CaptureError;
use crate::hub::FrameHub;

/// Handle to a node in a [`CdpDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CdpNodeRef(usize);

type Layouts = Option<Arc<HashMap<i64, BoxModel>>>;

#[derive(Debug, Clone)]
struct FlatNode {
    node_id: i64,
    node_type: i64,
    node_name: String,
    local_name: Option<String>,
    value: Option<String>,
    attributes: Vec<(String, String)>,
    children: Vec<CdpNodeRef>,
    parent: Option<CdpNodeRef>,
    shadow_root: Option<CdpNodeRef>,
    frame: Option<FrameIdentity>,
}

/// One frame realm of a snapshot.
#[derive(Debug, Clone)]
pub struct CdpDocument {
    url: String,
    nodes: Vec<FlatNode>,
    layouts: Layouts,
}

/// Routing name of the frame hosted by the iframe with CDP id `node_id`.
pub fn frame_name(node_id: i64) -> String {
    format!("cdp-frame-{node_id}")
}

/// Nested documents found while flattening, with the identity of their
/// hosting iframe.
type PendingFrames = Vec<(FrameIdentity, DomNode)>;

impl CdpDocument {
    /// Split a snapshot into its top document and its frames, in document
    /// order.
    pub fn split(
        snapshot: CdpSnapshot,
    ) -> Result<(CdpDocument, Vec<(FrameIdentity, CdpDocument)>), CaptureError> {
        let layouts: Layouts = snapshot.box_models.map(Arc::new);
        let (document, nested) = Self::flatten(snapshot.root, layouts.clone())?;

        let mut pending: VecDeque<(FrameIdentity, DomNode)> = nested.into();
        let mut frames = Vec::new();
        while let Some((identity, root)) = pending.pop_front() {
            let (frame, nested) = Self::flatten(root, layouts.clone())?;
            pending.extend(nested);
            frames.push((identity, frame));
        }

        debug!(
            "Split snapshot {} into {} frame(s)",
            document.url,
            frames.len()
        );
        Ok((document, frames))
    }

    fn flatten(root: DomNode, layouts: Layouts) -> Result<(Self, PendingFrames), CaptureError> {
        let mut document = Self {
            url: root.document_url.clone().unwrap_or_default(),
            nodes: Vec::new(),
            layouts,
        };
        let mut frames = Vec::new();
        document.add(root, None, &mut frames)?;
        Ok((document, frames))
    }

    fn add(
        &mut self,
        node: DomNode,
        parent: Option<CdpNodeRef>,
        frames: &mut PendingFrames,
    ) -> Result<CdpNodeRef, CaptureError> {
        let attributes = node
            .attribute_pairs()
            .ok_or(CaptureError::MalformedAttributes(node.node_id))?;
        let DomNode {
            node_id,
            node_type,
            node_name,
            local_name,
            node_value,
            children,
            content_document,
            shadow_roots,
            ..
        } = node;

        let id = CdpNodeRef(self.nodes.len());
        self.nodes.push(FlatNode {
            node_id,
            node_type,
            node_name,
            local_name,
            value: node_value,
            attributes,
            children: Vec::new(),
            parent,
            shadow_root: None,
            frame: None,
        });

        if let Some(content) = content_document {
            let identity = self.frame_identity(id, &content);
            self.nodes[id.0].frame = Some(identity.clone());
            frames.push((identity, *content));
        }

        let shadow = shadow_roots
            .into_iter()
            .flatten()
            .find(|root| !root.is_user_agent_shadow());
        if let Some(shadow) = shadow {
            let shadow_id = self.add(shadow, None, frames)?;
            self.nodes[id.0].shadow_root = Some(shadow_id);
        }

        for child in children.into_iter().flatten() {
            let child_id = self.add(child, Some(id), frames)?;
            self.nodes[id.0].children.push(child_id);
        }

        Ok(id)
    }

    /// Address a nested document by its hosting iframe.
    ///
    /// The name is the iframe's node id, unique across the snapshot, so two
    /// iframes sharing a `name` attribute or a URL (`about:srcdoc`) each
    /// receive their own document. The URL is the hosted document's, falling
    /// back to `src`.
    fn frame_identity(&self, iframe: CdpNodeRef, content: &DomNode) -> FrameIdentity {
        let owner = &self.nodes[iframe.0];
        let url = content
            .document_url
            .clone()
            .or_else(|| {
                owner
                    .attributes
                    .iter()
                    .find(|(name, _)| name == "src")
                    .map(|(_, value)| value.clone())
            })
            .unwrap_or_default();
        FrameIdentity::new(frame_name(owner.node_id), url)
    }

    pub fn root(&self) -> CdpNodeRef {
        CdpNodeRef(0)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, node: CdpNodeRef) -> &FlatNode {
        &self.nodes[node.0]
    }
}

impl LiveDom for CdpDocument {
    type Node = CdpNodeRef;

    fn kind(&self, node: CdpNodeRef) -> NodeKind {
        match self.node(node).node_type {
            DomNode::ELEMENT_NODE => NodeKind::Element,
            DomNode::TEXT_NODE => NodeKind::Text,
            DomNode::DOCUMENT_NODE | DomNode::DOCUMENT_FRAGMENT_NODE => NodeKind::Document,
            _ => NodeKind::Other,
        }
    }

    fn tag_name(&self, node: CdpNodeRef) -> Option<String> {
        if self.kind(node) != NodeKind::Element {
            return None;
        }
        let n = self.node(node);
        let name = n
            .local_name
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(&n.node_name);
        Some(name.to_ascii_lowercase())
    }

    fn attributes(&self, node: CdpNodeRef) -> Vec<(String, String)> {
        self.node(node).attributes.clone()
    }

    fn text(&self, node: CdpNodeRef) -> Option<String> {
        if self.kind(node) != NodeKind::Text {
            return None;
        }
        self.node(node).value.clone()
    }

    fn children(&self, node: CdpNodeRef) -> Vec<CdpNodeRef> {
        self.node(node).children.clone()
    }

    fn parent(&self, node: CdpNodeRef) -> Option<CdpNodeRef> {
        self.node(node).parent
    }

    /// HTML documents report HTML element names in upper case; SVG and
    /// MathML names keep their case.
    fn is_html(&self, node: CdpNodeRef) -> bool {
        let name = &self.node(node).node_name;
        self.kind(node) == NodeKind::Element && !name.chars().any(|c| c.is_ascii_lowercase())
    }

    fn layout(&self, node: CdpNodeRef) -> Option<LayoutBox> {
        let layouts = self.layouts.as_ref()?;
        let layout = match layouts.get(&self.node(node).node_id) {
            Some(model) => LayoutBox::new(model.width as f64, model.height as f64, 1),
            None => LayoutBox::default(),
        };
        Some(layout)
    }

    fn shadow_root(&self, node: CdpNodeRef) -> Option<CdpNodeRef> {
        self.node(node).shadow_root
    }

    fn frame_target(&self, node: CdpNodeRef) -> Option<FrameIdentity> {
        self.node(node).frame.clone()
    }
}

/// A frame document answering inspect requests.
#[derive(Debug, Clone)]
pub struct CdpFrame {
    identity: FrameIdentity,
    document: CdpDocument,
    config: CaptureConfig,
}

impl CdpFrame {
    pub fn new(identity: FrameIdentity, document: CdpDocument, config: CaptureConfig) -> Self {
        Self {
            identity,
            document,
            config,
        }
    }
}

#[async_trait]
impl FrameResponder for CdpFrame {
    fn identity(&self) -> &FrameIdentity {
        &self.identity
    }

    async fn inspect(&self, transport: &dyn FrameTransport) -> TreeNode {
        capture(&self.document, self.document.root(), transport, &self.config).await
    }
}

/// Capture a whole snapshot, frames included.
pub async fn capture_snapshot(
    snapshot: CdpSnapshot,
    config: &CaptureConfig,
) -> Result<TreeNode, CaptureError> {
    let (document, frames) = CdpDocument::split(snapshot)?;
    let hub = FrameHub::with_responders(frames.into_iter().map(|(identity, frame)| {
        Arc::new(CdpFrame::new(identity, frame, config.clone())) as Arc<dyn FrameResponder>
    }));
    Ok(capture(&document, document.root(), &hub, config).await)
}

/// Decode a snapshot from JSON.
pub fn parse_snapshot(json: &str) -> Result<CdpSnapshot, CaptureError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use formaudit_protocols::BoundaryKind;
    use serde_json::json;

    use super::*;

    fn snapshot(value: serde_json::Value) -> CdpSnapshot {
        serde_json::from_value(value).unwrap()
    }

    fn page_with_frame() -> serde_json::Value {
        json!({
            "root": {
                "nodeId": 1, "nodeType": 9, "nodeName": "#document",
                "documentURL": "https://shop.example/",
                "children": [{
                    "nodeId": 2, "nodeType": 1, "nodeName": "FORM", "localName": "form",
                    "children": [
                        {"nodeId": 3, "nodeType": 1, "nodeName": "INPUT", "localName": "input",
                         "attributes": ["name", "email"],
                         "shadowRoots": [{"nodeId": 4, "nodeType": 11, "nodeName": "#document-fragment",
                                          "shadowRootType": "user-agent",
                                          "children": [{"nodeId": 5, "nodeType": 1, "nodeName": "DIV"}]}]},
                        {"nodeId": 6, "nodeType": 1, "nodeName": "IFRAME", "localName": "iframe",
                         "attributes": ["name", "card", "src", "/card"],
                         "contentDocument": {
                            "nodeId": 7, "nodeType": 9, "nodeName": "#document",
                            "documentURL": "https://pay.example/card",
                            "children": [{"nodeId": 8, "nodeType": 1, "nodeName": "INPUT",
                                          "localName": "input", "attributes": ["name", "cc"]}]
                         }}
                    ]
                }]
            }
        })
    }

    #[test]
    fn test_split_frames() {
        let (document, frames) = CdpDocument::split(snapshot(page_with_frame())).unwrap();
        assert_eq!(document.url(), "https://shop.example/");
        assert_eq!(frames.len(), 1);
        assert_eq!(
            frames[0].0,
            FrameIdentity::new(frame_name(6), "https://pay.example/card")
        );
        assert_eq!(frames[0].1.url(), "https://pay.example/card");
    }

    #[test]
    fn test_user_agent_shadow_roots_ignored() {
        let (document, _) = CdpDocument::split(snapshot(page_with_frame())).unwrap();
        let input = document.node(document.root()).children[0];
        let input = document.node(input).children[0];
        assert_eq!(document.tag_name(input).as_deref(), Some("input"));
        assert_eq!(document.shadow_root(input), None);
    }

    #[test]
    fn test_malformed_attributes() {
        let err = CdpDocument::split(snapshot(json!({
            "root": {"nodeId": 1, "nodeType": 9, "nodeName": "#document",
                     "children": [{"nodeId": 9, "nodeType": 1, "nodeName": "INPUT",
                                   "attributes": ["type"]}]}
        })))
        .unwrap_err();
        assert!(matches!(err, CaptureError::MalformedAttributes(9)));
    }

    #[test]
    fn test_html_detection() {
        let (document, _) = CdpDocument::split(snapshot(json!({
            "root": {"nodeId": 1, "nodeType": 9, "nodeName": "#document",
                     "children": [
                        {"nodeId": 2, "nodeType": 1, "nodeName": "X-FIELD"},
                        {"nodeId": 3, "nodeType": 1, "nodeName": "svg"},
                        {"nodeId": 4, "nodeType": 3, "nodeName": "#text", "nodeValue": "hi"}
                     ]}
        })))
        .unwrap();
        let children = document.children(document.root());
        assert!(document.is_html(children[0]));
        assert!(!document.is_html(children[1]));
        assert!(!document.is_html(children[2]));
        assert_eq!(document.text(children[2]).as_deref(), Some("hi"));
    }

    #[test]
    fn test_layout_lookup() {
        let (document, _) = CdpDocument::split(snapshot(json!({
            "root": {"nodeId": 1, "nodeType": 9, "nodeName": "#document",
                     "children": [
                        {"nodeId": 2, "nodeType": 1, "nodeName": "INPUT"},
                        {"nodeId": 3, "nodeType": 1, "nodeName": "INPUT"}
                     ]},
            "boxModels": {"2": {"width": 120, "height": 24}}
        })))
        .unwrap();
        let children = document.children(document.root());
        assert!(document.layout(children[0]).unwrap().is_rendered());
        assert!(!document.layout(children[1]).unwrap().is_rendered());
    }

    #[tokio::test]
    async fn test_capture_snapshot_crosses_frames() {
        let tree = capture_snapshot(snapshot(page_with_frame()), &CaptureConfig::default())
            .await
            .unwrap();

        let expected = TreeNode::root(vec![TreeNode::element("form").with_children(vec![
            TreeNode::element("input").with_attr("name", "email"),
            TreeNode::element("iframe")
                .with_attr("name", "card")
                .with_attr("src", "/card")
                .with_child(TreeNode::boundary(
                    BoundaryKind::Document,
                    vec![TreeNode::root(vec![
                        TreeNode::element("input").with_attr("name", "cc"),
                    ])],
                )),
        ])]);
        assert_eq!(tree, expected);
    }

    #[tokio::test]
    async fn test_same_named_srcdoc_frames_keep_their_own_documents() {
        let frame = |node_id: i64, field: &str| {
            json!({
                "nodeId": node_id, "nodeType": 1, "nodeName": "IFRAME", "localName": "iframe",
                "attributes": ["name", "ad"],
                "contentDocument": {
                    "nodeId": node_id + 1, "nodeType": 9, "nodeName": "#document",
                    "documentURL": "about:srcdoc",
                    "children": [{"nodeId": node_id + 2, "nodeType": 1, "nodeName": "INPUT",
                                  "localName": "input", "attributes": ["name", field]}]
                }
            })
        };
        let page = json!({
            "root": {"nodeId": 1, "nodeType": 9, "nodeName": "#document",
                     "children": [frame(10, "first"), frame(20, "second")]}
        });

        let tree = capture_snapshot(snapshot(page), &CaptureConfig::default())
            .await
            .unwrap();

        let field_in = |iframe: &TreeNode| -> String {
            let document = &iframe.child_nodes()[0].child_nodes()[0];
            document.child_nodes()[0].attr("name").unwrap_or_default().to_string()
        };
        assert_eq!(field_in(&tree.child_nodes()[0]), "first");
        assert_eq!(field_in(&tree.child_nodes()[1]), "second");
    }

    #[test]
    fn test_parse_snapshot_error() {
        assert!(matches!(
            parse_snapshot("{\"root\": 1}"),
            Err(CaptureError::InvalidSnapshot(_))
        ));
    }
}
