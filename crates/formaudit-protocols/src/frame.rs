//! Cross-context frame messaging.
//!
//! Capture crosses iframe boundaries by sending an [`InspectRequest`] into the
//! frame's realm and awaiting the frame's own captured tree. The transport is
//! injected, so capture never depends on a concrete messaging mechanism.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::tree::TreeNode;

/// Request broadcast to frames: `{broadcast, wait, message: "inspect", name, url}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectRequest {
    pub broadcast: bool,
    pub wait: bool,
    pub message: String,
    pub name: String,
    pub url: String,
}

impl InspectRequest {
    pub const MESSAGE: &'static str = "inspect";

    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            broadcast: true,
            wait: true,
            message: Self::MESSAGE.to_string(),
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn is_inspect(&self) -> bool {
        self.message == Self::MESSAGE
    }
}

/// How a frame matched a request. `Name` outranks `Url`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FrameMatch {
    Url,
    Name,
}

/// The assigned name and current URL of a frame realm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameIdentity {
    pub name: String,
    pub url: String,
}

impl FrameIdentity {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Decide whether this frame should answer `request`.
    ///
    /// Empty names never match, otherwise every unnamed frame would answer
    /// every request for an unnamed iframe.
    pub fn matches(&self, request: &InspectRequest) -> Option<FrameMatch> {
        if !request.is_inspect() {
            return None;
        }
        if !self.name.is_empty() && self.name == request.name {
            return Some(FrameMatch::Name);
        }
        if !self.url.is_empty() && self.url == request.url {
            return Some(FrameMatch::Url);
        }
        None
    }
}

/// Async boundary used by capture to reach another realm.
#[async_trait]
pub trait FrameTransport: Send + Sync {
    /// Send `request` and await the matching frame's captured tree.
    async fn request(&self, request: InspectRequest) -> Result<TreeNode, TransportError>;
}

/// A frame realm able to capture its own document.
#[async_trait]
pub trait FrameResponder: Send + Sync {
    fn identity(&self) -> &FrameIdentity;

    /// Capture this frame's document. `transport` reaches nested frames.
    async fn inspect(&self, transport: &dyn FrameTransport) -> TreeNode;
}
