//! WASM entry points for the extension webview and the standalone page

mod host;
mod js_core;
mod page;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::clipboard::{PLAIN_TEXT_FORMAT, TEXT_FORMAT};
use crate::config::LaunchOptions;
use crate::dispatch::Bridge;
use crate::host::{EditorHost, ExtensionHost, StandaloneHost};
use crate::requests::RequestLedger;
use crate::{BridgeError, Result};

pub use self::host::{callback_slots, NavigatorClipboard, VsCodeApi, VsCodeSink, WindowScheduler};
pub use self::js_core::JsCore;
pub use self::page::{
    launch_options_from_globals, listen_clipboard, listen_language_picker, listen_messages,
    load_font, SharedBridge,
};

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    crate::logging::init_console(crate::logging::DEFAULT_FILTER);
}

/// Start the bridge inside the VS Code webview.
///
/// `core` is the editing core's module namespace. Launch options come from
/// the `fileName`/`fontFamily`/`fontSize` page globals.
#[wasm_bindgen(js_name = startExtensionBridge)]
pub async fn start_extension_bridge(core: JsValue) -> std::result::Result<(), JsValue> {
    start_extension(core).await.map_err(to_js_error)
}

/// Start the bridge on the standalone demo page.
///
/// `options` overrides the demo defaults and may be omitted.
#[wasm_bindgen(js_name = startStandaloneBridge)]
pub async fn start_standalone_bridge(
    core: JsValue,
    options: JsValue,
) -> std::result::Result<(), JsValue> {
    start_standalone(core, options).await.map_err(to_js_error)
}

async fn start_extension(core: JsValue) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| BridgeError::Load("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| BridgeError::Load("no document".to_string()))?;
    let options = launch_options_from_globals()?;

    let ledger = Rc::new(RequestLedger::new());
    let host: Rc<dyn EditorHost> = Rc::new(ExtensionHost::new(
        VsCodeSink::acquire()?,
        WindowScheduler::new(window.clone()),
        ledger.clone(),
    ));
    let core = JsCore::load(core, &callback_slots(host)?).await?;
    let bridge: SharedBridge = Rc::new(RefCell::new(Bridge::launch(core, options, ledger)?));

    page::listen_messages(&window, bridge.clone())?;
    page::listen_clipboard(&document, bridge, PLAIN_TEXT_FORMAT)?;
    Ok(())
}

async fn start_standalone(core: JsValue, options: JsValue) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| BridgeError::Load("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| BridgeError::Load("no document".to_string()))?;
    let options = if options.is_undefined() || options.is_null() {
        LaunchOptions::standalone()
    } else {
        let overrides = serde_wasm_bindgen::from_value(options)
            .map_err(|e| BridgeError::Config(e.to_string()))?;
        LaunchOptions::standalone().overlay(overrides)?
    };

    page::load_font(&document, &options).await?;

    let host: Rc<dyn EditorHost> = Rc::new(StandaloneHost::new(
        NavigatorClipboard::new(window.clone()),
        WindowScheduler::new(window),
    ));
    let core = JsCore::load(core, &callback_slots(host)?).await?;
    let picker = options.language_picker.clone();
    let bridge: SharedBridge = Rc::new(RefCell::new(Bridge::launch(
        core,
        options,
        Rc::new(RequestLedger::new()),
    )?));

    page::listen_clipboard(&document, bridge.clone(), TEXT_FORMAT)?;
    if let Some(id) = picker {
        page::listen_language_picker(&document, &id, bridge)?;
    }
    Ok(())
}

/// Best-effort text for a thrown JS value
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn to_js_error(err: BridgeError) -> JsValue {
    tracing::error!(error = %err, "bridge failed to start");
    js_sys::Error::new(&err.to_string()).into()
}
