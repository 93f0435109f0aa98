//! Host for the standalone demo page: no extension to talk to

use std::time::Duration;

use serde_json::Value;
use tracing::{trace, warn};

use super::{ClipboardWriter, EditorHost, LayoutScheduler};
use crate::protocol::TelemetryEntries;

/// Delay before the post-start resize on the demo page
pub const STANDALONE_RESIZE_DELAY: Duration = Duration::from_millis(10);

/// Writes clipboard contents straight to the system clipboard and drops the
/// rest of the core's traffic
pub struct StandaloneHost<C, L> {
    clipboard: C,
    scheduler: L,
}

impl<C: ClipboardWriter, L: LayoutScheduler> StandaloneHost<C, L> {
    pub fn new(clipboard: C, scheduler: L) -> Self {
        Self {
            clipboard,
            scheduler,
        }
    }
}

impl<C: ClipboardWriter, L: LayoutScheduler> EditorHost for StandaloneHost<C, L> {
    fn started(&self) {
        self.scheduler.schedule_resize(STANDALONE_RESIZE_DELAY);
    }

    fn edited(
        &self,
        _text: &str,
        start_line: usize,
        start_col: usize,
        _end_line: usize,
        _end_col: usize,
    ) {
        trace!(start_line, start_col, "edit not forwarded");
    }

    fn set_clipboard(&self, text: &str) {
        if let Err(err) = self.clipboard.write_text(text) {
            warn!(error = %err, "failed to write clipboard");
        }
    }

    fn request_quick_fixes(&self, _line: usize, _col: usize) {}

    fn request_completions(&self, _line: usize, _col: usize) {}

    fn request_hover_info(&self, _line: usize, _col: usize) {}

    fn execute_command(&self, command: &str, _args: Value) {
        trace!(command, "no host to run command");
    }

    fn execute_workspace_edit(&self, _edit: Value) {}

    fn telemetry_event(&self, _category: &str, _entries: TelemetryEntries) {}

    fn telemetry_crash(&self, message: &str) {
        warn!(crash = message, "editor core crashed");
    }
}
