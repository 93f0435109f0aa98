//! Envelopes posted from the bridge to the host

use serde::Serialize;
use serde_json::{Map, Value};

use super::EditRange;

/// Ordered key/value pairs attached to a telemetry event
pub type TelemetryEntries = Vec<(String, Value)>;

/// Bridge → host envelope, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// The editing session is ready
    Started,
    /// The buffer changed; `range` is the replaced span before the edit
    Edited { text: String, range: EditRange },
    /// Copy/cut produced clipboard contents
    SetClipboard { text: String },
    GetQuickFixes { line: usize, col: usize },
    GetCompletions { line: usize, col: usize },
    ExecuteCommand { command: String, args: Value },
    ExecuteWorkspaceEdit { edit: Value },
    TelemetryLog { cat: String, info: Map<String, Value> },
    TelemetryCrash { msg: String },
    HoverInfo { line: usize, col: usize },
}

impl OutboundMessage {
    /// Build an `edited` envelope from the core's flat callback arguments
    pub fn edited(
        text: impl Into<String>,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self::Edited {
            text: text.into(),
            range: EditRange::new(start_line, start_col, end_line, end_col),
        }
    }

    /// Build a `telemetry_log` envelope, folding the pairs into an object.
    /// A repeated key keeps its last value.
    pub fn telemetry(category: impl Into<String>, entries: TelemetryEntries) -> Self {
        let info = entries.into_iter().collect::<Map<String, Value>>();
        Self::TelemetryLog {
            cat: category.into(),
            info,
        }
    }

    /// The wire `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Edited { .. } => "edited",
            Self::SetClipboard { .. } => "set_clipboard",
            Self::GetQuickFixes { .. } => "get_quick_fixes",
            Self::GetCompletions { .. } => "get_completions",
            Self::ExecuteCommand { .. } => "execute_command",
            Self::ExecuteWorkspaceEdit { .. } => "execute_workspace_edit",
            Self::TelemetryLog { .. } => "telemetry_log",
            Self::TelemetryCrash { .. } => "telemetry_crash",
            Self::HoverInfo { .. } => "hover_info",
        }
    }

    /// Encode as a JSON value ready to post
    pub fn to_value(&self) -> Result<Value, crate::BridgeError> {
        serde_json::to_value(self).map_err(|e| crate::BridgeError::Encode {
            kind: self.kind(),
            reason: e.to_string(),
        })
    }
}
