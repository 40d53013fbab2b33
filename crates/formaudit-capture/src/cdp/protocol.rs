//! CDP DOM types, as returned by `DOM.getDocument` and `DOM.getBoxModel`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// DOM node from CDP.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    pub node_id: i64,
    #[serde(default)]
    pub backend_node_id: i64,
    pub node_type: i64,
    pub node_name: String,
    #[serde(default)]
    pub local_name: Option<String>,
    #[serde(default)]
    pub node_value: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<DomNode>>,
    #[serde(default)]
    pub attributes: Option<Vec<String>>,
    #[serde(default, rename = "documentURL")]
    pub document_url: Option<String>,
    #[serde(default)]
    pub frame_id: Option<String>,
    #[serde(default)]
    pub content_document: Option<Box<DomNode>>,
    #[serde(default)]
    pub shadow_roots: Option<Vec<DomNode>>,
    #[serde(default)]
    pub shadow_root_type: Option<String>,
}

impl DomNode {
    pub const ELEMENT_NODE: i64 = 1;
    pub const TEXT_NODE: i64 = 3;
    pub const DOCUMENT_NODE: i64 = 9;
    pub const DOCUMENT_FRAGMENT_NODE: i64 = 11;

    /// Whether this is a user-agent shadow root (the internals of `<input>`,
    /// `<select>` and friends).
    pub fn is_user_agent_shadow(&self) -> bool {
        self.shadow_root_type.as_deref() == Some("user-agent")
    }

    /// Attribute pairs from the flat `[name, value, name, value, ...]` list.
    ///
    /// Returns `None` when the list has an odd length.
    pub fn attribute_pairs(&self) -> Option<Vec<(String, String)>> {
        let flat = self.attributes.as_deref().unwrap_or_default();
        if flat.len() % 2 != 0 {
            return None;
        }
        Some(
            flat.chunks_exact(2)
                .map(|pair| (pair[0].clone(), pair[1].clone()))
                .collect(),
        )
    }
}

/// Box model from CDP.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxModel {
    #[serde(default)]
    pub content: Vec<f64>,
    #[serde(default)]
    pub padding: Vec<f64>,
    #[serde(default)]
    pub border: Vec<f64>,
    #[serde(default)]
    pub margin: Vec<f64>,
    pub width: i64,
    pub height: i64,
}

/// A saved page: the `DOM.getDocument {depth: -1, pierce: true}` result plus
/// optional box models keyed by `nodeId`.
///
/// When `boxModels` is absent the snapshot carries no layout and every node
/// counts as visible. When present, an element without an entry is treated
/// as not rendered, matching `DOM.getBoxModel` failing for such nodes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CdpSnapshot {
    pub root: DomNode,
    #[serde(default)]
    pub box_models: Option<HashMap<i64, BoxModel>>,
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
