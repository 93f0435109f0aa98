//! Error types for the bridge

use thiserror::Error;

/// Everything that can go wrong while relaying between host and core
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A known message type arrived with a missing or mistyped payload
    #[error("malformed `{kind}` message: {source}")]
    MalformedMessage {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An outbound envelope could not be turned into a host value
    #[error("failed to encode `{kind}` envelope: {reason}")]
    Encode { kind: &'static str, reason: String },

    /// The host refused or failed to accept a posted envelope
    #[error("failed to post `{kind}` envelope: {reason}")]
    Post { kind: &'static str, reason: String },

    /// A core entry point threw or is missing
    #[error("core call `{call}` failed: {reason}")]
    Core { call: &'static str, reason: String },

    /// Launch options failed validation
    #[error("invalid launch options: {0}")]
    Config(String),

    /// The editing core could not be instantiated
    #[error("editing core failed to load: {0}")]
    Load(String),

    /// System clipboard access failed
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

pub type Result<T, E = BridgeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_display() {
        let source = serde_json::from_str::<String>("1").unwrap_err();
        let err = BridgeError::MalformedMessage {
            kind: "set_text",
            source,
        };
        assert!(err.to_string().starts_with("malformed `set_text` message"));
    }

    #[test]
    fn test_core_error_display() {
        let err = BridgeError::Core {
            call: "undo",
            reason: "not a function".to_string(),
        };
        assert_eq!(err.to_string(), "core call `undo` failed: not a function");
    }
}
