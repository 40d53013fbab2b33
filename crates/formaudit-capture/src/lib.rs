//! # formaudit Capture
//!
//! Converts a live document into the [`TreeNode`](formaudit_protocols::TreeNode)
//! format audited by `formaudit-core`.
//!
//! - [`LiveDom`] - read access to one document realm
//! - [`capture`] - breadth-first capture crossing shadow roots and frames
//! - [`FrameHub`] - in-process [`FrameTransport`](formaudit_protocols::FrameTransport)
//!   broadcasting inspect requests to registered frames
//! - [`cdp`] - a [`LiveDom`] over saved CDP `DOM.getDocument` snapshots

mod capture;
pub mod cdp;
mod config;
mod dom;
mod error;
mod hub;

pub use capture::capture;
pub use cdp::{CdpDocument, CdpFrame, CdpSnapshot, capture_snapshot, parse_snapshot};
pub use config::{
    CaptureConfig, DEFAULT_FRAME_TIMEOUT, DEFAULT_IGNORED_ATTRIBUTE_PATTERNS,
    DEFAULT_IGNORED_TAGS, DEFAULT_MAX_VALUE_LENGTH,
};
pub use dom::{LayoutBox, LiveDom, NodeKind};
pub use error::CaptureError;
pub use hub::FrameHub;
