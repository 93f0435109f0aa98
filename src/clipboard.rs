//! Page-level copy/cut/paste interception
//!
//! The core renders its own text buffer, so the browser's default clipboard
//! handling never sees a real selection. Every clipboard event is routed to
//! the core instead and the default action is suppressed.

use tracing::debug;

use crate::dispatch::Bridge;
use crate::engine::EditorCore;
use crate::Result;

/// Clipboard format read on paste by the extension webview
pub const PLAIN_TEXT_FORMAT: &str = "text/plain";
/// Clipboard format read on paste by the standalone page
pub const TEXT_FORMAT: &str = "text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardAction {
    Copy,
    Cut,
    Paste,
}

impl ClipboardAction {
    /// DOM event name
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Cut => "cut",
            Self::Paste => "paste",
        }
    }
}

/// The parts of a DOM clipboard event the bridge touches
pub trait ClipboardEvent {
    /// Clipboard data in `format`, if the event carries any
    fn data(&self, format: &str) -> Option<String>;

    fn prevent_default(&self);
}

impl<C: EditorCore> Bridge<C> {
    /// Route a clipboard event to the core, suppressing the browser default.
    ///
    /// The default is suppressed even when the core call fails.
    pub fn handle_clipboard(
        &mut self,
        action: ClipboardAction,
        event: &impl ClipboardEvent,
        paste_format: &str,
    ) -> Result<()> {
        event.prevent_default();
        match action {
            ClipboardAction::Copy => self.core_mut().copy_selection(),
            ClipboardAction::Cut => self.core_mut().cut_selection(),
            ClipboardAction::Paste => match event.data(paste_format) {
                Some(text) => self.core_mut().insert_text(&text),
                None => {
                    debug!(format = paste_format, "paste without clipboard data");
                    Ok(())
                }
            },
        }
    }
}
