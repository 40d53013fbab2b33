//! # formaudit Protocols
//!
//! Contract types shared by the capture and audit stages.
//! Contains only data definitions and traits - no algorithms.
//!
//! ## Core Types
//!
//! - [`TreeNode`] - Serializable captured node (the persisted format)
//! - [`BoundaryKind`] - Shadow-root / document boundary marker
//! - [`InspectRequest`] - Cross-context request sent into an iframe's realm
//! - [`FrameTransport`] - Async boundary used by capture to reach frames
//! - [`FrameResponder`] - A frame realm able to answer inspect requests

pub mod error;
pub mod frame;
pub mod tree;

pub use error::TransportError;
pub use frame::{FrameIdentity, FrameMatch, FrameResponder, FrameTransport, InspectRequest};
pub use tree::{BoundaryKind, TreeNode};
