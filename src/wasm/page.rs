//! DOM listeners and page setup

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Event, FontFace, HtmlSelectElement, MessageEvent, Window};

use super::describe;
use super::js_core::JsCore;
use crate::clipboard::{ClipboardAction, ClipboardEvent};
use crate::config::LaunchOptions;
use crate::dispatch::{Bridge, Dispatch};
use crate::{BridgeError, Result};

pub type SharedBridge = Rc<RefCell<Bridge<JsCore>>>;

/// Page globals the webview template sets before loading the bridge
const LAUNCH_GLOBALS: [&str; 4] = ["fileName", "docId", "fontFamily", "fontSize"];

/// Read launch options from the injected globals, defaulting what is unset
pub fn launch_options_from_globals() -> Result<LaunchOptions> {
    let global = js_sys::global();
    let mut fields = Map::new();
    for name in LAUNCH_GLOBALS {
        let Ok(value) = Reflect::get(&global, &JsValue::from_str(name)) else {
            continue;
        };
        if let Some(text) = value.as_string() {
            fields.insert(name.to_string(), Value::String(text));
        } else if let Some(number) = value.as_f64() {
            fields.insert(name.to_string(), Value::from(number));
        }
    }
    LaunchOptions::from_json(Value::Object(fields))
}

/// Register the font and wait until it can be measured
pub async fn load_font(document: &Document, options: &LaunchOptions) -> Result<()> {
    let Some(source) = options.font_source.as_deref() else {
        return Ok(());
    };
    let face = FontFace::new_with_str(&options.font_family, source)
        .map_err(|e| BridgeError::Load(describe(&e)))?;
    let fonts = document.fonts();
    fonts
        .add(&face)
        .map_err(|e| BridgeError::Load(describe(&e)))?;
    JsFuture::from(fonts.load(&options.font_shorthand()))
        .await
        .map_err(|e| BridgeError::Load(describe(&e)))?;
    info!(font = %options.font_shorthand(), "font loaded");
    Ok(())
}

/// Route `message` events from the extension into the bridge
pub fn listen_messages(window: &Window, bridge: SharedBridge) -> Result<()> {
    let listener = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        let value: Value = match serde_wasm_bindgen::from_value(event.data()) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "ignoring non-JSON message");
                return;
            }
        };
        match bridge.borrow_mut().handle_value(&value) {
            Ok(Dispatch::Handled(_)) | Ok(Dispatch::Ignored) => {}
            Err(err) => warn!(error = %err, "host message failed"),
        }
    });
    window
        .add_event_listener_with_callback("message", listener.as_ref().unchecked_ref())
        .map_err(|e| BridgeError::Load(describe(&e)))?;
    listener.forget();
    Ok(())
}

impl ClipboardEvent for web_sys::ClipboardEvent {
    fn data(&self, format: &str) -> Option<String> {
        self.clipboard_data()?
            .get_data(format)
            .ok()
            .filter(|text| !text.is_empty())
    }

    fn prevent_default(&self) {
        Event::prevent_default(self);
    }
}

/// Route copy/cut/paste on the document into the core
pub fn listen_clipboard(
    document: &Document,
    bridge: SharedBridge,
    paste_format: &'static str,
) -> Result<()> {
    for action in [ClipboardAction::Copy, ClipboardAction::Cut, ClipboardAction::Paste] {
        let bridge = bridge.clone();
        let listener = Closure::<dyn FnMut(web_sys::ClipboardEvent)>::new(
            move |event: web_sys::ClipboardEvent| {
                if let Err(err) = bridge
                    .borrow_mut()
                    .handle_clipboard(action, &event, paste_format)
                {
                    warn!(action = action.event_name(), error = %err, "clipboard action failed");
                }
            },
        );
        document
            .add_event_listener_with_callback(
                action.event_name(),
                listener.as_ref().unchecked_ref(),
            )
            .map_err(|e| BridgeError::Load(describe(&e)))?;
        listener.forget();
    }
    Ok(())
}

/// Switch languages when the picker `<select>` changes.
///
/// A page without the picker is not an error.
pub fn listen_language_picker(document: &Document, id: &str, bridge: SharedBridge) -> Result<()> {
    let Some(picker) = document.get_element_by_id(id) else {
        debug!(id, "no language picker on page");
        return Ok(());
    };
    let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(select) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        if let Err(err) = bridge.borrow_mut().set_language(&select.value()) {
            warn!(error = %err, "language switch failed");
        }
    });
    picker
        .add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
        .map_err(|e| BridgeError::Load(describe(&e)))?;
    listener.forget();
    Ok(())
}
