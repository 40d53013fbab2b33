//! Capture error types.

use thiserror::Error;

/// Errors raised while preparing a capture.
///
/// Capture itself never fails: frames that do not answer are logged and
/// omitted. These errors come from decoding snapshots and building config.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Snapshot JSON did not decode.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] serde_json::Error),

    /// A CDP attribute list with an odd number of entries.
    #[error("Malformed attributes on node {0}")]
    MalformedAttributes(i64),

    /// An ignored-attribute pattern that is not a valid regex.
    #[error("Invalid attribute pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
