//! Editor bridge: message relay between an editor host and a text-editing core
//!
//! This crate provides:
//! - Typed envelopes for both directions of the host protocol
//! - An exhaustive dispatcher from host messages to core entry points
//! - The callback slots the core reports through, for the VS Code webview
//!   and the standalone demo page
//! - Page-level clipboard interception
//! - WASM bindings that wire all of it into the browser

pub mod clipboard;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod host;
pub mod logging;
pub mod protocol;
pub mod requests;
pub mod wasm;

// Re-export primary types
pub use clipboard::{ClipboardAction, ClipboardEvent};
pub use config::{Language, LaunchOptions};
pub use dispatch::{Bridge, Dispatch};
pub use engine::{CoreCall, EditorCore, TranscriptCore};
pub use error::{BridgeError, Result};
pub use host::{
    ClipboardWriter, EditorHost, ExtensionHost, LayoutScheduler, MessageSink, StandaloneHost,
};
pub use protocol::{EditRange, InboundKind, InboundMessage, OutboundMessage};
pub use requests::{RequestKind, RequestLedger};
