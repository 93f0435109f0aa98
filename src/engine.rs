//! The editing core's entry points, as seen from the bridge

use serde_json::Value;

use crate::Result;

/// Entry points the bridge drives on the editing core.
///
/// The core itself (parsing, editing, rendering) lives elsewhere; on the web
/// it is a separately compiled module wrapped by [`crate::wasm::JsCore`].
/// Payloads typed as [`Value`] are opaque to the bridge.
pub trait EditorCore {
    /// Start the editing session for `document` with the given font
    fn run_editor(&mut self, document: &str, font_family: &str, font_size: f64) -> Result<()>;

    /// Replace the whole buffer
    fn set_text(&mut self, text: &str) -> Result<()>;

    /// Switch the active file name, and with it the language
    fn set_file(&mut self, file_name: &str) -> Result<()>;

    /// Apply an edit made outside the editor
    fn apply_edit(&mut self, edit: Value) -> Result<()>;

    /// Copy the selection; the core answers through `set_clipboard`
    fn copy_selection(&mut self) -> Result<()>;

    /// Cut the selection; the core answers through `set_clipboard`
    fn cut_selection(&mut self) -> Result<()>;

    fn insert_text(&mut self, text: &str) -> Result<()>;

    fn new_diagnostics(&mut self, diagnostics: Value) -> Result<()>;

    fn set_hover_info(&mut self, hover: Value) -> Result<()>;

    fn set_quick_fixes(&mut self, actions: Value) -> Result<()>;

    fn set_completions(&mut self, completions: Value) -> Result<()>;

    fn undo(&mut self) -> Result<()>;

    fn redo(&mut self) -> Result<()>;
}

/// A core call, recorded by [`TranscriptCore`]
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum CoreCall {
    RunEditor {
        document: String,
        font_family: String,
        font_size: f64,
    },
    SetText { text: String },
    SetFile { file_name: String },
    ApplyEdit { edit: Value },
    CopySelection,
    CutSelection,
    InsertText { text: String },
    NewDiagnostics { diagnostics: Value },
    SetHoverInfo { hover: Value },
    SetQuickFixes { actions: Value },
    SetCompletions { completions: Value },
    Undo,
    Redo,
}

/// A core that only records what it was asked to do.
///
/// Backs the replay tool and the test suite.
#[derive(Debug, Default)]
pub struct TranscriptCore {
    calls: Vec<CoreCall>,
}

impl TranscriptCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far, oldest first
    pub fn calls(&self) -> &[CoreCall] {
        &self.calls
    }

    /// Remove and return the recorded calls
    pub fn take_calls(&mut self) -> Vec<CoreCall> {
        std::mem::take(&mut self.calls)
    }

    fn record(&mut self, call: CoreCall) -> Result<()> {
        self.calls.push(call);
        Ok(())
    }
}

impl EditorCore for TranscriptCore {
    fn run_editor(&mut self, document: &str, font_family: &str, font_size: f64) -> Result<()> {
        self.record(CoreCall::RunEditor {
            document: document.to_string(),
            font_family: font_family.to_string(),
            font_size,
        })
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.record(CoreCall::SetText {
            text: text.to_string(),
        })
    }

    fn set_file(&mut self, file_name: &str) -> Result<()> {
        self.record(CoreCall::SetFile {
            file_name: file_name.to_string(),
        })
    }

    fn apply_edit(&mut self, edit: Value) -> Result<()> {
        self.record(CoreCall::ApplyEdit { edit })
    }

    fn copy_selection(&mut self) -> Result<()> {
        self.record(CoreCall::CopySelection)
    }

    fn cut_selection(&mut self) -> Result<()> {
        self.record(CoreCall::CutSelection)
    }

    fn insert_text(&mut self, text: &str) -> Result<()> {
        self.record(CoreCall::InsertText {
            text: text.to_string(),
        })
    }

    fn new_diagnostics(&mut self, diagnostics: Value) -> Result<()> {
        self.record(CoreCall::NewDiagnostics { diagnostics })
    }

    fn set_hover_info(&mut self, hover: Value) -> Result<()> {
        self.record(CoreCall::SetHoverInfo { hover })
    }

    fn set_quick_fixes(&mut self, actions: Value) -> Result<()> {
        self.record(CoreCall::SetQuickFixes { actions })
    }

    fn set_completions(&mut self, completions: Value) -> Result<()> {
        self.record(CoreCall::SetCompletions { completions })
    }

    fn undo(&mut self) -> Result<()> {
        self.record(CoreCall::Undo)
    }

    fn redo(&mut self) -> Result<()> {
        self.record(CoreCall::Redo)
    }
}
