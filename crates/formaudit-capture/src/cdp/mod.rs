//! Chrome DevTools Protocol snapshots.

mod document;
pub mod protocol;

pub use document::{
    CdpDocument, CdpFrame, CdpNodeRef, capture_snapshot, frame_name, parse_snapshot,
};
pub use protocol::{BoxModel, CdpSnapshot, DomNode};
