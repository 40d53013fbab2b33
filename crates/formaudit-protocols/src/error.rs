//! Cross-context transport errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Timeout duration exceeded")]
    Timeout,

    #[error("No frame responded to inspect request (name: {name:?}, url: {url:?})")]
    NoResponder { name: String, url: String },

    #[error("Transport channel closed")]
    ChannelClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        assert_eq!(TransportError::Timeout.to_string(), "Timeout duration exceeded");
    }

    #[test]
    fn test_no_responder_message() {
        let err = TransportError::NoResponder {
            name: "checkout".to_string(),
            url: "https://example.com/pay".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("checkout"));
        assert!(display.contains("example.com/pay"));
    }

    #[test]
    fn test_errors_compare_by_value() {
        assert_eq!(TransportError::ChannelClosed, TransportError::ChannelClosed);
        assert_ne!(TransportError::ChannelClosed, TransportError::Timeout);
    }
}
