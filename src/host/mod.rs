//! Outbound side: the callback slots the core invokes, and the hosts behind them

mod extension;
mod standalone;

use std::time::Duration;

use serde_json::Value;

use crate::protocol::{OutboundMessage, TelemetryEntries};
use crate::Result;

pub use extension::{ExtensionHost, EXTENSION_RESIZE_DELAY};
pub use standalone::{StandaloneHost, STANDALONE_RESIZE_DELAY};

/// Callback slots handed to the core at load time.
///
/// All slots are fire-and-forget: they return nothing to the core, and
/// failures are logged by the implementation.
pub trait EditorHost {
    /// The session is ready
    fn started(&self);

    /// The buffer changed: `text` replaced the given span
    fn edited(
        &self,
        text: &str,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    );

    fn set_clipboard(&self, text: &str);

    fn request_quick_fixes(&self, line: usize, col: usize);

    fn request_completions(&self, line: usize, col: usize);

    fn request_hover_info(&self, line: usize, col: usize);

    /// Ask the host to run one of its commands
    fn execute_command(&self, command: &str, args: Value);

    /// Ask the host to apply a multi-file edit
    fn execute_workspace_edit(&self, edit: Value);

    fn telemetry_event(&self, category: &str, entries: TelemetryEntries);

    /// The core hit an unrecoverable error
    fn telemetry_crash(&self, message: &str);
}

/// Where outbound envelopes go (the webview's postMessage handle)
pub trait MessageSink {
    fn post(&self, message: &OutboundMessage) -> Result<()>;
}

/// Deferred layout nudges once the page has rendered
pub trait LayoutScheduler {
    /// Fire one resize signal after `delay`
    fn schedule_resize(&self, delay: Duration);
}

/// Direct access to the system clipboard
pub trait ClipboardWriter {
    fn write_text(&self, text: &str) -> Result<()>;
}
