//! Envelopes posted from the host to the bridge

use serde::Deserialize;
use serde_json::Value;

use crate::{BridgeError, Result};

/// Host → bridge envelope, tagged by `type`.
///
/// Payloads other than `text` belong to the core and are passed through
/// untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    SetText { text: String },
    ApplyEdit { edit: Value },
    NewDiagnostics { diagnostics: Value },
    ReturnQuickFixes { actions: Value },
    ReturnCompletions { completions: Value },
    Undo,
    Redo,
    ReturnDocumentationInfo { hover: Value },
}

/// The recognised inbound `type` tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InboundKind {
    SetText,
    ApplyEdit,
    NewDiagnostics,
    ReturnQuickFixes,
    ReturnCompletions,
    Undo,
    Redo,
    ReturnDocumentationInfo,
}

impl InboundKind {
    /// Look up a wire tag; `None` for anything the bridge does not handle
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "set_text" => Self::SetText,
            "apply_edit" => Self::ApplyEdit,
            "new_diagnostics" => Self::NewDiagnostics,
            "return_quick_fixes" => Self::ReturnQuickFixes,
            "return_completions" => Self::ReturnCompletions,
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "return_documentation_info" => Self::ReturnDocumentationInfo,
            _ => return None,
        })
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::SetText => "set_text",
            Self::ApplyEdit => "apply_edit",
            Self::NewDiagnostics => "new_diagnostics",
            Self::ReturnQuickFixes => "return_quick_fixes",
            Self::ReturnCompletions => "return_completions",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::ReturnDocumentationInfo => "return_documentation_info",
        }
    }
}

impl InboundMessage {
    /// Decode a host message.
    ///
    /// Returns `Ok(None)` when the value has no string `type` or the type is
    /// not one the bridge handles. Known types with a bad payload are errors.
    pub fn from_value(value: &Value) -> Result<Option<Self>> {
        let Some(kind) = value
            .get("type")
            .and_then(Value::as_str)
            .and_then(InboundKind::from_tag)
        else {
            return Ok(None);
        };

        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|source| BridgeError::MalformedMessage {
                kind: kind.tag(),
                source,
            })
    }

    pub fn kind(&self) -> InboundKind {
        match self {
            Self::SetText { .. } => InboundKind::SetText,
            Self::ApplyEdit { .. } => InboundKind::ApplyEdit,
            Self::NewDiagnostics { .. } => InboundKind::NewDiagnostics,
            Self::ReturnQuickFixes { .. } => InboundKind::ReturnQuickFixes,
            Self::ReturnCompletions { .. } => InboundKind::ReturnCompletions,
            Self::Undo => InboundKind::Undo,
            Self::Redo => InboundKind::Redo,
            Self::ReturnDocumentationInfo { .. } => InboundKind::ReturnDocumentationInfo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_set_text() {
        let message = InboundMessage::from_value(&json!({"type": "set_text", "text": "abc"}))
            .unwrap()
            .unwrap();
        assert_eq!(
            message,
            InboundMessage::SetText {
                text: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_decode_unit_variants_ignore_extra_fields() {
        let message = InboundMessage::from_value(&json!({"type": "undo", "origin": "menu"}))
            .unwrap()
            .unwrap();
        assert_eq!(message, InboundMessage::Undo);
    }

    #[test]
    fn test_opaque_payload_kept_verbatim() {
        let hover = json!([{"contents": ["```python\ndef f()\n```"], "range": null}]);
        let message = InboundMessage::from_value(
            &json!({"type": "return_documentation_info", "hover": hover.clone()}),
        )
        .unwrap()
        .unwrap();
        assert_eq!(message, InboundMessage::ReturnDocumentationInfo { hover });
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        assert_eq!(
            InboundMessage::from_value(&json!({"type": "reload_window"})).unwrap(),
            None
        );
        assert_eq!(InboundMessage::from_value(&json!({"text": "abc"})).unwrap(), None);
        assert_eq!(InboundMessage::from_value(&json!({"type": 7})).unwrap(), None);
        assert_eq!(InboundMessage::from_value(&json!("set_text")).unwrap(), None);
    }

    #[test]
    fn test_known_type_with_bad_payload_is_malformed() {
        let err = InboundMessage::from_value(&json!({"type": "set_text", "text": 5})).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::MalformedMessage {
                kind: "set_text",
                ..
            }
        ));

        let err = InboundMessage::from_value(&json!({"type": "set_text"})).unwrap_err();
        assert!(matches!(err, BridgeError::MalformedMessage { .. }));
    }

    #[test]
    fn test_tags_round_trip_through_kind() {
        let kinds = [
            InboundKind::SetText,
            InboundKind::ApplyEdit,
            InboundKind::NewDiagnostics,
            InboundKind::ReturnQuickFixes,
            InboundKind::ReturnCompletions,
            InboundKind::Undo,
            InboundKind::Redo,
            InboundKind::ReturnDocumentationInfo,
        ];
        for kind in kinds {
            assert_eq!(InboundKind::from_tag(kind.tag()), Some(kind));
        }
    }
}
