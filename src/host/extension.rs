//! Host for the VS Code extension webview

use std::rc::Rc;
use std::time::Duration;

use serde_json::Value;
use tracing::{trace, warn};

use super::{EditorHost, LayoutScheduler, MessageSink};
use crate::protocol::{OutboundMessage, TelemetryEntries};
use crate::requests::{RequestKind, RequestLedger};

/// Delay before the post-start resize in the webview
pub const EXTENSION_RESIZE_DELAY: Duration = Duration::from_millis(50);

/// Forwards every callback slot to the extension as one envelope
pub struct ExtensionHost<S, L> {
    sink: S,
    scheduler: L,
    ledger: Rc<RequestLedger>,
}

impl<S: MessageSink, L: LayoutScheduler> ExtensionHost<S, L> {
    pub fn new(sink: S, scheduler: L, ledger: Rc<RequestLedger>) -> Self {
        Self {
            sink,
            scheduler,
            ledger,
        }
    }

    /// The ledger shared with the dispatcher
    pub fn ledger(&self) -> &Rc<RequestLedger> {
        &self.ledger
    }

    fn post(&self, message: OutboundMessage) {
        trace!(kind = message.kind(), "posting to extension");
        if let Err(err) = self.sink.post(&message) {
            warn!(kind = message.kind(), error = %err, "dropped outbound message");
        }
    }

    fn request(&self, kind: RequestKind, line: usize, col: usize) {
        self.ledger.issue(kind, line, col);
        self.post(match kind {
            RequestKind::QuickFixes => OutboundMessage::GetQuickFixes { line, col },
            RequestKind::Completions => OutboundMessage::GetCompletions { line, col },
            RequestKind::Hover => OutboundMessage::HoverInfo { line, col },
        });
    }
}

impl<S: MessageSink, L: LayoutScheduler> EditorHost for ExtensionHost<S, L> {
    fn started(&self) {
        self.scheduler.schedule_resize(EXTENSION_RESIZE_DELAY);
        self.post(OutboundMessage::Started);
    }

    fn edited(
        &self,
        text: &str,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) {
        self.post(OutboundMessage::edited(
            text, start_line, start_col, end_line, end_col,
        ));
    }

    fn set_clipboard(&self, text: &str) {
        self.post(OutboundMessage::SetClipboard {
            text: text.to_string(),
        });
    }

    fn request_quick_fixes(&self, line: usize, col: usize) {
        self.request(RequestKind::QuickFixes, line, col);
    }

    fn request_completions(&self, line: usize, col: usize) {
        self.request(RequestKind::Completions, line, col);
    }

    fn request_hover_info(&self, line: usize, col: usize) {
        self.request(RequestKind::Hover, line, col);
    }

    fn execute_command(&self, command: &str, args: Value) {
        self.post(OutboundMessage::ExecuteCommand {
            command: command.to_string(),
            args,
        });
    }

    fn execute_workspace_edit(&self, edit: Value) {
        self.post(OutboundMessage::ExecuteWorkspaceEdit { edit });
    }

    fn telemetry_event(&self, category: &str, entries: TelemetryEntries) {
        self.post(OutboundMessage::telemetry(category, entries));
    }

    fn telemetry_crash(&self, message: &str) {
        self.post(OutboundMessage::TelemetryCrash {
            msg: message.to_string(),
        });
    }
}
