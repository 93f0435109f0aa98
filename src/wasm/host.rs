//! Browser implementations of the host seams, and the callback object the
//! core is loaded with

use std::rc::Rc;
use std::time::Duration;

use js_sys::{Object, Reflect};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{UiEvent, Window};

use super::describe;
use crate::host::{ClipboardWriter, EditorHost, LayoutScheduler, MessageSink};
use crate::protocol::{OutboundMessage, TelemetryEntries};
use crate::{BridgeError, Result};

#[wasm_bindgen]
extern "C" {
    /// Handle returned by the webview's `acquireVsCodeApi()`
    pub type VsCodeApi;

    #[wasm_bindgen(catch, js_name = acquireVsCodeApi)]
    fn acquire_vscode_api() -> std::result::Result<VsCodeApi, JsValue>;

    #[wasm_bindgen(method, catch, js_name = postMessage)]
    fn post_message(this: &VsCodeApi, message: &JsValue) -> std::result::Result<(), JsValue>;
}

/// Posts envelopes to the extension through the webview handle.
///
/// `acquireVsCodeApi` may only be called once per page, so the sink owns the
/// handle for the lifetime of the session.
pub struct VsCodeSink {
    api: VsCodeApi,
}

impl VsCodeSink {
    pub fn acquire() -> Result<Self> {
        let api = acquire_vscode_api().map_err(|e| BridgeError::Load(describe(&e)))?;
        Ok(Self { api })
    }
}

impl MessageSink for VsCodeSink {
    fn post(&self, message: &OutboundMessage) -> Result<()> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let value = message
            .serialize(&serializer)
            .map_err(|e| BridgeError::Encode {
                kind: message.kind(),
                reason: e.to_string(),
            })?;
        self.api
            .post_message(&value)
            .map_err(|e| BridgeError::Post {
                kind: message.kind(),
                reason: describe(&e),
            })
    }
}

/// Dispatches a synthetic `resize` on the window after a timeout
pub struct WindowScheduler {
    window: Window,
}

impl WindowScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl LayoutScheduler for WindowScheduler {
    fn schedule_resize(&self, delay: Duration) {
        let window = self.window.clone();
        let fire = Closure::once_into_js(move || {
            let dispatched = UiEvent::new("resize").and_then(|event| window.dispatch_event(&event));
            if let Err(e) = dispatched {
                warn!(error = %describe(&e), "failed to dispatch resize");
            }
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(fire.unchecked_ref(), millis)
        {
            warn!(error = %describe(&e), "failed to schedule resize");
        }
    }
}

/// Writes through `navigator.clipboard`
pub struct NavigatorClipboard {
    window: Window,
}

impl NavigatorClipboard {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl ClipboardWriter for NavigatorClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let pending = self.window.navigator().clipboard().write_text(text);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(pending).await {
                warn!(error = %describe(&e), "clipboard write rejected");
            }
        });
        Ok(())
    }
}

/// Build the callback object handed to the core's `init`.
///
/// Slot names are the camelCase names the core imports. The closures are
/// handed to the JS garbage collector and live as long as the core holds them.
pub fn callback_slots(host: Rc<dyn EditorHost>) -> Result<Object> {
    let slots = Object::new();

    let h = host.clone();
    set_slot(
        &slots,
        "started",
        Closure::<dyn Fn()>::new(move || h.started()).into_js_value(),
    )?;

    let h = host.clone();
    set_slot(
        &slots,
        "edited",
        Closure::<dyn Fn(String, usize, usize, usize, usize)>::new(
            move |text: String, start_line, start_col, end_line, end_col| {
                h.edited(&text, start_line, start_col, end_line, end_col)
            },
        )
        .into_js_value(),
    )?;

    let h = host.clone();
    set_slot(
        &slots,
        "setClipboard",
        Closure::<dyn Fn(String)>::new(move |text: String| h.set_clipboard(&text)).into_js_value(),
    )?;

    let h = host.clone();
    set_slot(
        &slots,
        "requestQuickFixes",
        Closure::<dyn Fn(usize, usize)>::new(move |line, col| h.request_quick_fixes(line, col))
            .into_js_value(),
    )?;

    let h = host.clone();
    set_slot(
        &slots,
        "requestCompletions",
        Closure::<dyn Fn(usize, usize)>::new(move |line, col| h.request_completions(line, col))
            .into_js_value(),
    )?;

    let h = host.clone();
    set_slot(
        &slots,
        "requestHoverInfo",
        Closure::<dyn Fn(usize, usize)>::new(move |line, col| h.request_hover_info(line, col))
            .into_js_value(),
    )?;

    let h = host.clone();
    set_slot(
        &slots,
        "executeCommand",
        Closure::<dyn Fn(String, JsValue)>::new(move |command: String, args: JsValue| {
            h.execute_command(&command, payload_from_js("executeCommand", args))
        })
        .into_js_value(),
    )?;

    let h = host.clone();
    set_slot(
        &slots,
        "executeWorkspaceEdit",
        Closure::<dyn Fn(JsValue)>::new(move |edit: JsValue| {
            h.execute_workspace_edit(payload_from_js("executeWorkspaceEdit", edit))
        })
        .into_js_value(),
    )?;

    let h = host.clone();
    set_slot(
        &slots,
        "telemetryEvent",
        Closure::<dyn Fn(String, JsValue)>::new(move |category: String, info: JsValue| {
            h.telemetry_event(&category, telemetry_entries(info))
        })
        .into_js_value(),
    )?;

    let h = host;
    set_slot(
        &slots,
        "telemetryCrash",
        Closure::<dyn Fn(String)>::new(move |message: String| h.telemetry_crash(&message))
            .into_js_value(),
    )?;

    Ok(slots)
}

fn set_slot(slots: &Object, name: &str, callback: JsValue) -> Result<()> {
    Reflect::set(slots, &JsValue::from_str(name), &callback)
        .map(|_| ())
        .map_err(|e| BridgeError::Load(describe(&e)))
}

/// Convert an opaque JS payload; anything unrepresentable becomes `null`
fn payload_from_js(slot: &'static str, value: JsValue) -> Value {
    if value.is_undefined() {
        return Value::Null;
    }
    serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
        warn!(slot, error = %e, "payload is not JSON-representable");
        Value::Null
    })
}

/// Telemetry info arrives as `[key, value]` pairs; plain objects are
/// accepted too
fn telemetry_entries(info: JsValue) -> TelemetryEntries {
    if let Ok(entries) = serde_wasm_bindgen::from_value::<TelemetryEntries>(info.clone()) {
        return entries;
    }
    match serde_wasm_bindgen::from_value::<Map<String, Value>>(info) {
        Ok(object) => object.into_iter().collect(),
        Err(e) => {
            warn!(error = %e, "telemetry info is neither pairs nor an object");
            TelemetryEntries::new()
        }
    }
}
