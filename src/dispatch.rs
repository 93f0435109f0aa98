//! Inbound side: routing host messages to core entry points

use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, info, trace};

use crate::config::{Language, LaunchOptions};
use crate::engine::EditorCore;
use crate::protocol::{InboundKind, InboundMessage};
use crate::requests::{RequestKind, RequestLedger};
use crate::Result;

/// Outcome of offering a raw host message to the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Routed to exactly one core entry point
    Handled(InboundKind),
    /// Not a message the bridge handles; nothing was called
    Ignored,
}

/// A launched editing session.
///
/// Only exists once the core has been loaded and `run_editor` has been
/// called, so nothing can be dispatched to a core that is not running.
pub struct Bridge<C> {
    core: C,
    options: LaunchOptions,
    ledger: Rc<RequestLedger>,
}

impl<C: EditorCore> Bridge<C> {
    /// Start the session on a loaded core
    pub fn launch(mut core: C, options: LaunchOptions, ledger: Rc<RequestLedger>) -> Result<Self> {
        let options = options.validated()?;
        core.run_editor(&options.document, &options.font_family, options.font_size)?;
        info!(
            document = %options.document,
            font = %options.font_shorthand(),
            "editor session started"
        );
        Ok(Self {
            core,
            options,
            ledger,
        })
    }

    /// Decode and route a raw host message.
    ///
    /// Unknown types are ignored without error.
    pub fn handle_value(&mut self, value: &Value) -> Result<Dispatch> {
        match InboundMessage::from_value(value)? {
            Some(message) => {
                let kind = message.kind();
                self.handle_message(message)?;
                Ok(Dispatch::Handled(kind))
            }
            None => {
                trace!(message_type = ?value.get("type"), "ignoring host message");
                Ok(Dispatch::Ignored)
            }
        }
    }

    /// Route a decoded host message to its core entry point
    pub fn handle_message(&mut self, message: InboundMessage) -> Result<()> {
        debug!(kind = message.kind().tag(), "dispatching host message");
        match message {
            InboundMessage::SetText { text } => self.core.set_text(&text),
            InboundMessage::ApplyEdit { edit } => self.core.apply_edit(edit),
            InboundMessage::NewDiagnostics { diagnostics } => {
                self.core.new_diagnostics(diagnostics)
            }
            InboundMessage::ReturnQuickFixes { actions } => {
                self.ledger.settle(RequestKind::QuickFixes);
                self.core.set_quick_fixes(actions)
            }
            InboundMessage::ReturnCompletions { completions } => {
                self.ledger.settle(RequestKind::Completions);
                self.core.set_completions(completions)
            }
            InboundMessage::Undo => self.core.undo(),
            InboundMessage::Redo => self.core.redo(),
            InboundMessage::ReturnDocumentationInfo { hover } => {
                self.ledger.settle(RequestKind::Hover);
                self.core.set_hover_info(hover)
            }
        }
    }

    /// Switch the active language by extension, keeping the document stem
    pub fn set_language(&mut self, extension: &str) -> Result<()> {
        let file_name = self.options.document_with_extension(extension);
        debug!(%file_name, language = ?Language::for_file(&file_name), "switching language");
        self.core.set_file(&file_name)?;
        self.options.document = file_name;
        Ok(())
    }

    pub fn options(&self) -> &LaunchOptions {
        &self.options
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CoreCall, TranscriptCore};
    use crate::BridgeError;
    use serde_json::json;

    fn launched() -> Bridge<TranscriptCore> {
        let mut bridge = Bridge::launch(
            TranscriptCore::new(),
            LaunchOptions::default(),
            Rc::new(RequestLedger::new()),
        )
        .unwrap();
        bridge.core_mut().take_calls();
        bridge
    }

    fn dispatch(value: Value) -> (Dispatch, Vec<CoreCall>) {
        let mut bridge = launched();
        let outcome = bridge.handle_value(&value).unwrap();
        (outcome, bridge.core_mut().take_calls())
    }

    #[test]
    fn test_launch_runs_editor_once() {
        let options = LaunchOptions {
            document: "main.rs".to_string(),
            font_family: "Fira Code".to_string(),
            font_size: 12.0,
            ..LaunchOptions::default()
        };
        let bridge =
            Bridge::launch(TranscriptCore::new(), options, Rc::new(RequestLedger::new())).unwrap();
        assert_eq!(
            bridge.core().calls(),
            [CoreCall::RunEditor {
                document: "main.rs".to_string(),
                font_family: "Fira Code".to_string(),
                font_size: 12.0,
            }]
        );
    }

    #[test]
    fn test_launch_rejects_invalid_options() {
        let options = LaunchOptions {
            font_size: -1.0,
            ..LaunchOptions::default()
        };
        let result = Bridge::launch(TranscriptCore::new(), options, Rc::new(RequestLedger::new()));
        assert!(matches!(result, Err(BridgeError::Config(_))));
    }

    #[test]
    fn test_set_text_routes_once() {
        let (outcome, calls) = dispatch(json!({"type": "set_text", "text": "abc"}));
        assert_eq!(outcome, Dispatch::Handled(InboundKind::SetText));
        assert_eq!(
            calls,
            vec![CoreCall::SetText {
                text: "abc".to_string()
            }]
        );
    }

    #[test]
    fn test_every_inbound_type_routes_to_its_entry_point() {
        let edit = json!({"text": "b", "range": {"start": {"line": 0, "character": 0}}});
        let diagnostics = json!([{"message": "unused", "severity": 2}]);
        let actions = json!([{"title": "Remove import"}]);
        let completions = json!([{"label": "print"}]);
        let hover = json!([{"contents": ["def print()"]}]);

        let cases = vec![
            (
                json!({"type": "apply_edit", "edit": edit.clone()}),
                CoreCall::ApplyEdit { edit },
            ),
            (
                json!({"type": "new_diagnostics", "diagnostics": diagnostics.clone()}),
                CoreCall::NewDiagnostics { diagnostics },
            ),
            (
                json!({"type": "return_quick_fixes", "actions": actions.clone()}),
                CoreCall::SetQuickFixes { actions },
            ),
            (
                json!({"type": "return_completions", "completions": completions.clone()}),
                CoreCall::SetCompletions { completions },
            ),
            (json!({"type": "undo"}), CoreCall::Undo),
            (json!({"type": "redo"}), CoreCall::Redo),
            (
                json!({"type": "return_documentation_info", "hover": hover.clone()}),
                CoreCall::SetHoverInfo { hover },
            ),
        ];

        for (message, expected) in cases {
            let (outcome, calls) = dispatch(message.clone());
            assert!(matches!(outcome, Dispatch::Handled(_)), "{message}");
            assert_eq!(calls, vec![expected], "{message}");
        }
    }

    #[test]
    fn test_unknown_type_calls_nothing() {
        let (outcome, calls) = dispatch(json!({"type": "format_document"}));
        assert_eq!(outcome, Dispatch::Ignored);
        assert!(calls.is_empty());

        let (outcome, calls) = dispatch(json!(null));
        assert_eq!(outcome, Dispatch::Ignored);
        assert!(calls.is_empty());
    }

    #[test]
    fn test_malformed_known_type_calls_nothing() {
        let mut bridge = launched();
        let result = bridge.handle_value(&json!({"type": "set_text", "text": ["a"]}));
        assert!(matches!(result, Err(BridgeError::MalformedMessage { .. })));
        assert!(bridge.core().calls().is_empty());
    }

    #[test]
    fn test_responses_settle_ledger_but_always_deliver() {
        let ledger = Rc::new(RequestLedger::new());
        let options = LaunchOptions::default();
        let mut bridge = Bridge::launch(TranscriptCore::new(), options, ledger.clone()).unwrap();

        ledger.issue(RequestKind::Completions, 2, 4);
        bridge
            .handle_value(&json!({"type": "return_completions", "completions": []}))
            .unwrap();
        assert!(!ledger.is_outstanding(RequestKind::Completions));

        // Unsolicited: still delivered
        bridge
            .handle_value(&json!({"type": "return_completions", "completions": [1]}))
            .unwrap();
        assert_eq!(
            bridge.core().calls().last(),
            Some(&CoreCall::SetCompletions {
                completions: json!([1])
            })
        );
    }

    #[test]
    fn test_set_language_keeps_stem() {
        let mut bridge = launched();
        bridge.set_language("rs").unwrap();
        bridge.set_language("java").unwrap();
        assert_eq!(
            bridge.core().calls(),
            [
                CoreCall::SetFile {
                    file_name: "test.rs".to_string()
                },
                CoreCall::SetFile {
                    file_name: "test.java".to_string()
                },
            ]
        );
        assert_eq!(bridge.options().document, "test.java");
    }
}
