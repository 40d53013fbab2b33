//! Live document abstraction.

use formaudit_protocols::FrameIdentity;

/// What a DOM node is, as far as capture cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// A document or document fragment (including shadow roots).
    Document,
    /// Comments, doctypes, processing instructions.
    Other,
}

/// Rendered geometry of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutBox {
    pub offset_width: f64,
    pub offset_height: f64,
    pub client_rects: usize,
}

impl LayoutBox {
    pub fn new(offset_width: f64, offset_height: f64, client_rects: usize) -> Self {
        Self {
            offset_width,
            offset_height,
            client_rects,
        }
    }

    /// Non-zero offset box, or at least one client rect.
    pub fn is_rendered(&self) -> bool {
        self.offset_width > 0.0 || self.offset_height > 0.0 || self.client_rects > 0
    }
}

/// Read access to a document realm.
///
/// Node handles are cheap copies. Every accessor tolerates any handle the
/// implementation produced and returns empty values for nodes of the wrong
/// kind.
pub trait LiveDom: Sync {
    type Node: Copy + Send + Sync;

    fn kind(&self, node: Self::Node) -> NodeKind;

    /// Lowercase tag name of an element.
    fn tag_name(&self, node: Self::Node) -> Option<String>;

    /// Attributes in source order.
    fn attributes(&self, node: Self::Node) -> Vec<(String, String)>;

    /// Raw character data of a text node.
    fn text(&self, node: Self::Node) -> Option<String>;

    /// Child nodes in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Whether this is an HTML element, as opposed to SVG, MathML or a
    /// non-element node.
    fn is_html(&self, node: Self::Node) -> bool;

    /// Layout of the node, or `None` when the realm has no layout information.
    fn layout(&self, node: Self::Node) -> Option<LayoutBox>;

    /// Open or closed author shadow root attached to an element.
    fn shadow_root(&self, node: Self::Node) -> Option<Self::Node>;

    /// Identity of the realm an `iframe` element hosts.
    fn frame_target(&self, node: Self::Node) -> Option<FrameIdentity>;
}
